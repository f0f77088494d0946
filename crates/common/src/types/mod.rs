use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

impl Health {
    pub fn current() -> Self {
        Self {
            status: "ok",
            service: "menu-service",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}
