/// Process-level configuration, loaded once from the environment at
/// startup. Distinct from the per-request `Weights` object carried in
/// the `config` field of `OptimizeRequest`.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    pub port: u16,
    pub solver_time_limit_secs: f64,
}

impl Config {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5000);
        let solver_time_limit_secs = std::env::var("SOLVER_TIME_LIMIT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30.0);

        Self {
            port,
            solver_time_limit_secs,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5000,
            solver_time_limit_secs: 30.0,
        }
    }
}
