pub mod sys_paths;
