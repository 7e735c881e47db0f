//! How a request proves that it belongs to a logged in session.

use chrono::{DateTime, Months, Utc};
use std::fmt;

/// Name of the cookie the portal keeps its session in.
pub const SESSION_COOKIE_NAME: &str = "_moneybook_session";

/// An opaque credential attached to every outgoing request.
///
/// The token is never printed by the `Debug` impl.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// A session cookie, the way a logged in browser sends it.
    SessionCookie {
        name: String,
        token: String
    },

    /// An `Authorization: Bearer` header.
    Bearer(String)
}

impl Credential {
    /// The portal's own session cookie carrying `token`.
    #[inline]
    pub fn session(token: impl Into<String>) -> Self {
        Credential::SessionCookie {
            name: SESSION_COOKIE_NAME.into(),
            token: token.into()
        }
    }

    #[inline]
    pub fn bearer(token: impl Into<String>) -> Self {
        Credential::Bearer(token.into())
    }

    /// The cookie this credential stands for, issued at `now`.
    ///
    /// `None` for credentials that are not cookies.
    pub fn cookie(&self, now: DateTime<Utc>) -> Option<SessionCookie> {
        match self {
            Credential::SessionCookie { name, token } => Some(SessionCookie {
                name: name.clone(),
                value: token.clone(),
                expires: now.checked_add_months(Months::new(12)),
                http_only: true,
                secure: true
            }),
            Credential::Bearer(_) => None
        }
    }

    /// Attaches this credential to a request.
    #[cfg(feature = "http-client")]
    pub fn apply(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self {
            Credential::SessionCookie { .. } => match self.cookie(Utc::now()) {
                Some(cookie) => builder.header(reqwest::header::COOKIE, cookie.request_header()),
                None => builder
            },
            Credential::Bearer(token) => builder.bearer_auth(token)
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Credential::SessionCookie { name, .. } => f
                .debug_struct("SessionCookie")
                .field("name", name)
                .field("token", &"<redacted>")
                .finish(),
            Credential::Bearer(_) => f.debug_tuple("Bearer").field(&"<redacted>").finish()
        }
    }
}

/// A session cookie along with the attributes it is issued with.
///
/// Only `name=value` goes out on a request; the attributes describe how the
/// cookie would be stored and are what `Display` renders.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
    pub expires: Option<DateTime<Utc>>,
    pub http_only: bool,
    pub secure: bool
}

impl SessionCookie {
    /// Value for a request's `Cookie` header.
    #[inline]
    pub fn request_header(&self) -> String {
        format!("{}={}", self.name, self.value)
    }
}

impl fmt::Debug for SessionCookie {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("SessionCookie")
            .field("name", &self.name)
            .field("value", &"<redacted>")
            .field("expires", &self.expires)
            .field("http_only", &self.http_only)
            .field("secure", &self.secure)
            .finish()
    }
}

/// `Set-Cookie` style rendering, for logs and debugging. The value is redacted.
impl fmt::Display for SessionCookie {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}=<redacted>", self.name)?;
        if let Some(expires) = self.expires {
            write!(f, "; Expires={}", expires.format("%a, %d %b %Y %H:%M:%S GMT"))?;
        }
        if self.http_only {
            write!(f, "; HttpOnly")?;
        }
        if self.secure {
            write!(f, "; Secure")?;
        }
        Ok(())
    }
}
