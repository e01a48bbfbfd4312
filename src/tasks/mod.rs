pub mod compass_task;
