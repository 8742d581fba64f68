pub mod repository_explorer;
