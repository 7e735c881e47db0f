use std::time::Duration;

error_chain! {
    foreign_links {
        Transport(::reqwest::Error) #[cfg(feature = "http-client")];
        SelectorConfig(::toml::de::Error);
    }

    errors {
        UnexpectedStatus(code: u16, text: String) {
            description("The status code of a received response was not success.")
            display("The status code of a received response was {} {} and not success.",
                     code, text)
        }

        ParseError(reason: String) {
            description("A response body could not be parsed as an HTML document.")
            display("A response body could not be parsed as an HTML document: {}", reason)
        }

        NotAuthenticated {
            description("The fetched page does not belong to an authenticated session.")
            display("The fetched page is missing the authenticated header; \
                     the session token is probably expired or invalid.")
        }

        AmountParseError(text: String) {
            description("An amount could not be read from the page.")
            display("An amount could not be read from the text {:?}", text)
        }

        Cancelled {
            description("The request was cancelled by the caller.")
            display("The request was cancelled by the caller.")
        }

        DeadlineExceeded(timeout: Duration) {
            description("The request did not finish before its deadline.")
            display("The request did not finish within {:?}.", timeout)
        }

        InvalidHost(host: String) {
            description("The configured host is not a usable base URL.")
            display("The configured host {:?} is not a usable base URL.", host)
        }

        InvalidSelector(name: String, selector: String) {
            description("A configured CSS selector could not be parsed.")
            display("The CSS selector {:?} configured for `{}` could not be parsed.",
                     selector, name)
        }
    }
}
