pub mod catalog;
pub mod errors;
pub mod form;
pub mod launch_log;
pub mod resolver;
pub mod validator;
