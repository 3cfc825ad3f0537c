pub mod cast_server;
