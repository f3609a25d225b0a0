pub mod user_repository_memory;
