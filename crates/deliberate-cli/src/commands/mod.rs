pub mod activities;
pub mod evaluate;
pub mod init;
pub mod interactive;
pub mod practice;
