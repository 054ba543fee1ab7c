//! `--health-check` support for container liveness checks.

use std::time::Duration;

use cardcred::constants::DEFAULT_PORT;

/// Command-line flag that runs the check instead of the server.
pub const HEALTH_CHECK_FLAG: &str = "--health-check";

const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(1);

/// Local `/healthz` URL for the port in `port_var`, falling back to the
/// default port when it is unset or not a valid port.
pub fn health_check_url(port_var: Option<&str>) -> String {
    let port = port_var
        .and_then(|p| p.trim().parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);

    format!("http://127.0.0.1:{}/healthz", port)
}

/// Process exit code for a GET of `url`: 0 on a 2xx answer, 1 otherwise.
///
/// Runs on the caller's runtime.
pub async fn check_health(url: &str) -> i32 {
    let Ok(client) = reqwest::Client::builder()
        .timeout(HEALTH_CHECK_TIMEOUT)
        .build()
    else {
        return 1;
    };

    match client.get(url).send().await {
        Ok(res) if res.status().is_success() => 0,
        Ok(res) => {
            tracing::debug!(status = res.status().as_u16(), "Health check failed");
            1
        }
        Err(e) => {
            tracing::debug!(error = %e, "Health check request failed");
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check_url_uses_port_var() {
        assert_eq!(
            health_check_url(Some("9191")),
            "http://127.0.0.1:9191/healthz"
        );
    }

    #[test]
    fn test_health_check_url_falls_back_to_default_port() {
        let expected = format!("http://127.0.0.1:{}/healthz", DEFAULT_PORT);
        assert_eq!(health_check_url(None), expected);
        assert_eq!(health_check_url(Some("not-a-port")), expected);
    }
}
