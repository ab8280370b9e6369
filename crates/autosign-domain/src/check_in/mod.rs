mod gateway;
mod harvester;
mod policy;
mod provider;
mod value_objects;

pub use gateway::CheckInGateway;
pub use harvester::{missing_waf_cookies, WafCookieHarvester, REQUIRED_WAF_COOKIES};
pub use policy::CheckInPolicy;
pub use provider::Provider;
pub use value_objects::{CheckInOutcome, UserInfo};
