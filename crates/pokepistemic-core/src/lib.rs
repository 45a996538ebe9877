#![deny(warnings)]
pub mod catalog;
pub mod epistemic;
pub mod model;
pub mod session;

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "pokepistemic"
    }

    pub const fn codename() -> &'static str {
        "Kripke Tracker"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}
