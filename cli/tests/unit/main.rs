//! Unit tests for the ecs-deploy CLI
//!
//! These tests use mocked dependencies and run fast without AWS access.

mod deploy_service;
mod task_wait;
