mod http_params;
mod server_params;

pub use http_params::HttpParams;
pub use server_params::ServerParams;
