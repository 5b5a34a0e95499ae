//! Whole-configuration validation run before a client is built

use super::ClientConfig;
use crate::error::Result;

impl ClientConfig {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns a `Kind::Config` error if the security policy is inconsistent,
    /// the target port is zero, or the proxy points back at the target itself.
    pub fn validate(&self) -> Result<()> {
        self.security.validate()?;

        if self.target.port() == 0 {
            return Err(crate::error::config(format!("target {} has port 0", self.target)));
        }

        if let Some(proxy) = &self.proxy {
            if proxy.endpoint() == &self.target {
                return Err(crate::error::config(format!(
                    "proxy {} is the same endpoint as the target",
                    proxy.endpoint()
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::config::ClientConfig;
    use crate::proxy::ProxyConfig;

    #[test]
    fn proxy_equal_to_target_is_rejected() {
        let config = ClientConfig::parse("origin.example:443", 443)
            .expect("config")
            .with_proxy(ProxyConfig::parse("origin.example:443").expect("proxy"));
        assert!(config.validate().unwrap_err().is_config());
    }
}
