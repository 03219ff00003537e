use crate::stores::session_store::SessionStore;
use crate::utils::time::current_timestamp;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

pub struct Metrics {
    pub login_attempts: AtomicU64,
    pub logins_granted: AtomicU64,
    pub invalid_credentials: AtomicU64,
    pub not_authorized: AtomicU64,
    pub dashboard_views: AtomicU64,
    pub gate_rejections: AtomicU64,
    pub start_time: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub login_attempts: u64,
    pub logins_granted: u64,
    pub invalid_credentials: u64,
    pub not_authorized: u64,
    pub login_success_rate: f64,
    pub dashboard_views: u64,
    pub gate_rejections: u64,
    pub sessions: usize,
    pub authenticated_sessions: usize,
    pub uptime_seconds: i64,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            login_attempts: AtomicU64::new(0),
            logins_granted: AtomicU64::new(0),
            invalid_credentials: AtomicU64::new(0),
            not_authorized: AtomicU64::new(0),
            dashboard_views: AtomicU64::new(0),
            gate_rejections: AtomicU64::new(0),
            start_time: current_timestamp(),
        }
    }

    pub fn increment_login_attempts(&self) {
        self.login_attempts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_granted(&self) {
        self.logins_granted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_invalid_credentials(&self) {
        self.invalid_credentials.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_not_authorized(&self) {
        self.not_authorized.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_dashboard_views(&self) {
        self.dashboard_views.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_gate_rejections(&self) {
        self.gate_rejections.fetch_add(1, Ordering::Relaxed);
    }

    /// Counters plus session totals and derived rates
    pub fn get_snapshot(&self, sessions: &SessionStore) -> MetricsSnapshot {
        let login_attempts = self.login_attempts.load(Ordering::Relaxed);
        let logins_granted = self.logins_granted.load(Ordering::Relaxed);

        let login_success_rate = if login_attempts > 0 {
            (logins_granted as f64 / login_attempts as f64) * 100.0
        } else {
            0.0
        };

        MetricsSnapshot {
            login_attempts,
            logins_granted,
            invalid_credentials: self.invalid_credentials.load(Ordering::Relaxed),
            not_authorized: self.not_authorized.load(Ordering::Relaxed),
            login_success_rate,
            dashboard_views: self.dashboard_views.load(Ordering::Relaxed),
            gate_rejections: self.gate_rejections.load(Ordering::Relaxed),
            sessions: sessions.len(),
            authenticated_sessions: sessions.authenticated_count(),
            uptime_seconds: current_timestamp() - self.start_time,
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
