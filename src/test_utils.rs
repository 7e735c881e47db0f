use crate::scrapers::Selectors;

pub const CASH_FLOW_PAGE: &str = "cash_flow.html";
pub const EMPTY_CASH_FLOW_PAGE: &str = "cash_flow_empty.html";
pub const HOME_PAGE: &str = "home.html";
pub const LOGIN_PAGE: &str = "login.html";

/// HTML of a saved page from `test_data/`.
pub fn fixture(name: &str) -> &'static str {
    match name {
        CASH_FLOW_PAGE => include_str!("../test_data/cash_flow.html"),
        EMPTY_CASH_FLOW_PAGE => include_str!("../test_data/cash_flow_empty.html"),
        HOME_PAGE => include_str!("../test_data/home.html"),
        LOGIN_PAGE => include_str!("../test_data/login.html"),
        _ => panic!("no fixture named {}", name)
    }
}

pub fn builtin_selectors() -> Selectors {
    Selectors::builtin().unwrap()
}
