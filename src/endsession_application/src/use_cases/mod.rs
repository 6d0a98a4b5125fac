pub mod decode;
mod dispatch;
pub mod logout;
