pub mod interface;
pub mod packet;
pub mod route;
pub mod table;
