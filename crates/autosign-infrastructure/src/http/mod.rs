pub mod client;
pub mod waf_bypass;

pub use client::HttpClient;
pub use waf_bypass::WafBypassService;
