pub mod movies_request;
pub mod movies_response;
pub mod movies_route;
