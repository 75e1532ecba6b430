pub mod cloud;
pub mod config;
pub mod db;
pub mod error;
pub mod init_pet_types;
pub mod pet_types;
pub mod routes;
