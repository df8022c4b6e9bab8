pub mod command;
pub mod pacer;
pub mod sim;
