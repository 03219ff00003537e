pub mod core {
    pub mod config;
    pub mod error;
    pub mod state;
    pub mod routes;
    pub mod startup;
    pub mod tracing_init;
}

pub mod models {
    pub mod admin;
    pub mod dashboard;
    pub mod sale;
    pub mod user;
}

pub mod stores {
    pub mod credential_store;
    pub mod sales_store;
    pub mod session_store;
}

pub mod auth {
    pub mod authenticator;
    pub mod gate;
}

pub mod analytics {
    pub mod aggregations;
    pub mod format;
    pub mod kpi;
}

pub mod handlers {
    pub mod admin;
    pub mod dashboard;
    pub mod fallback;
    pub mod health;
    pub mod login;
    pub mod metrics;
}

pub mod metrics {
    pub mod collector;
}

pub mod utils {
    pub mod auth;
    pub mod cookie;
    pub mod csv_source;
    pub mod time;
}
