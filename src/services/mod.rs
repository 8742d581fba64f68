pub mod github_client;
pub mod issue_analyzer;
pub mod issue_classifier;
pub mod issue_scorer;
pub mod similarity_ranker;
pub mod complexity_estimator;
pub mod related_files;
pub mod repo_analyzer;
pub mod report_generator;
