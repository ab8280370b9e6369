use serde::{Deserialize, Serialize};

/// Target service description: origin, endpoint paths and the identity
/// header the service authorizes by (together with cookies).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Provider {
    name: String,
    domain: String,
    login_path: String,
    sign_in_path: String,
    user_info_path: String,
    api_user_key: String,
    needs_waf_bypass: bool,
}

impl Provider {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: String,
        domain: String,
        login_path: String,
        sign_in_path: String,
        user_info_path: String,
        api_user_key: String,
        needs_waf_bypass: bool,
    ) -> Self {
        Self {
            name,
            domain,
            login_path,
            sign_in_path,
            user_info_path,
            api_user_key,
            needs_waf_bypass,
        }
    }

    /// Builtin preset for the AnyRouter service.
    pub fn anyrouter() -> Self {
        Self::new(
            "AnyRouter".to_string(),
            "https://anyrouter.top".to_string(),
            "/login".to_string(),
            "/api/user/sign_in".to_string(),
            "/api/user/self".to_string(),
            "new-api-user".to_string(),
            true,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn login_url(&self) -> String {
        format!("{}{}", self.domain, self.login_path)
    }

    pub fn sign_in_url(&self) -> String {
        format!("{}{}", self.domain, self.sign_in_path)
    }

    pub fn user_info_url(&self) -> String {
        format!("{}{}", self.domain, self.user_info_path)
    }

    pub fn api_user_key(&self) -> &str {
        &self.api_user_key
    }

    pub fn needs_waf_bypass(&self) -> bool {
        self.needs_waf_bypass
    }
}
