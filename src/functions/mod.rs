pub mod markdown;
pub mod route_url;
pub mod subpages;
