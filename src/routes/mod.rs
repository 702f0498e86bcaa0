//! Static route table for the console.
//!
//! Dashboard pages live under the authenticated shell layout, sign-in pages
//! under the public auth layout. Anything else is the not-found page.

mod guard;

pub use guard::*;

/// Path of the sign-in page unauthenticated visitors are sent to.
pub const LOGIN_PATH: &str = "/auth/login";
pub const HOME_PATH: &str = "/";

/// Layout a page is nested under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Authenticated dashboard shell; every page under it is guarded
    Shell,
    /// Public sign-in layout
    Auth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Transaction,
    Reservation,
    ClientManagement,
    FleetManagement,
    DriverManagement,
    DriverSchedule,
    Location,
    Extra,
    Team,
    Faq,
    Contact,
    CategoryList,
    PrivacyPolicy,
    TermsAndConditions,
    Notification,
    Settings,
    Login,
    ForgotPassword,
    VerifyOtp,
    ResetPassword,
    NotFound,
}

impl Page {
    pub fn title(&self) -> &'static str {
        match self {
            Page::Home => "Dashboard",
            Page::Transaction => "Transactions",
            Page::Reservation => "Reservations",
            Page::ClientManagement => "Client Management",
            Page::FleetManagement => "Fleet Management",
            Page::DriverManagement => "Driver Management",
            Page::DriverSchedule => "Driver Schedule",
            Page::Location => "Locations",
            Page::Extra => "Extras",
            Page::Team => "Team",
            Page::Faq => "FAQ",
            Page::Contact => "Contact",
            Page::CategoryList => "Categories",
            Page::PrivacyPolicy => "Privacy Policy",
            Page::TermsAndConditions => "Terms and Conditions",
            Page::Notification => "Notifications",
            Page::Settings => "Settings",
            Page::Login => "Login",
            Page::ForgotPassword => "Forgot Password",
            Page::VerifyOtp => "Verify OTP",
            Page::ResetPassword => "Reset Password",
            Page::NotFound => "Not Found",
        }
    }
}

/// One row of the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteEntry {
    pub path: &'static str,
    pub page: Page,
    pub layout: Layout,
}

const fn shell(path: &'static str, page: Page) -> RouteEntry {
    RouteEntry {
        path,
        page,
        layout: Layout::Shell,
    }
}

const fn auth(path: &'static str, page: Page) -> RouteEntry {
    RouteEntry {
        path,
        page,
        layout: Layout::Auth,
    }
}

pub const ROUTES: &[RouteEntry] = &[
    shell("/", Page::Home),
    shell("/transaction", Page::Transaction),
    shell("/reservation", Page::Reservation),
    shell("/client-management", Page::ClientManagement),
    shell("/fleet-management", Page::FleetManagement),
    shell("/driver-management", Page::DriverManagement),
    shell("/driver-schedule", Page::DriverSchedule),
    shell("/location", Page::Location),
    shell("/extra", Page::Extra),
    shell("/team", Page::Team),
    shell("/faq", Page::Faq),
    shell("/contact", Page::Contact),
    shell("/category-list", Page::CategoryList),
    shell("/privacy-policy", Page::PrivacyPolicy),
    shell("/terms-and-conditions", Page::TermsAndConditions),
    shell("/notification", Page::Notification),
    shell("/settings", Page::Settings),
    auth("/auth", Page::Login),
    auth("/auth/login", Page::Login),
    auth("/auth/forgot-password", Page::ForgotPassword),
    auth("/auth/verify-otp", Page::VerifyOtp),
    auth("/auth/reset-password", Page::ResetPassword),
];

/// Strip query string, fragment and trailing slashes.
fn normalize(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let trimmed = path[..end].trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

/// Find the route entry for `path`, or `None` for the not-found page.
pub fn match_path(path: &str) -> Option<&'static RouteEntry> {
    let path = normalize(path);
    ROUTES.iter().find(|entry| entry.path == path)
}
