use crate::tests::descriptor;
use crate::{LaunchCommand, ProcessHandle, Role, ServiceStatus};

use googletest::prelude::*;

#[test]
fn given_role_strings_when_parsed_then_only_manager_is_manager() {
    assert_that!(Role::parse("manager"), eq(Role::Manager));
    assert_that!(Role::parse("MANAGER"), eq(Role::Manager));
    assert_that!(Role::parse("client"), eq(Role::Client));
    assert_that!(Role::parse("admin"), eq(Role::Client));
    assert_that!(Role::parse(""), eq(Role::Client));
}

#[test]
fn test_service_status_as_str() {
    assert_eq!(ServiceStatus::Stopped.as_str(), "stopped");
    assert_eq!(ServiceStatus::Starting.as_str(), "starting");
    assert_eq!(ServiceStatus::Running.as_str(), "running");
    assert_eq!(ServiceStatus::Stopping.as_str(), "stopping");
    assert_eq!(ServiceStatus::default(), ServiceStatus::Stopped);
}

#[test]
fn given_transitional_statuses_when_checked_then_only_starting_and_stopping_match() {
    assert!(ServiceStatus::Starting.is_transitional());
    assert!(ServiceStatus::Stopping.is_transitional());
    assert!(!ServiceStatus::Running.is_transitional());
    assert!(!ServiceStatus::Stopped.is_transitional());
}

#[test]
fn given_new_descriptor_when_created_then_stopped_healthy_without_process() {
    // When
    let d = descriptor("user", 8001, 1);

    // Then
    assert_that!(d.status, eq(ServiceStatus::Stopped));
    assert_that!(d.healthy, eq(true));
    assert_that!(d.process, none());
    assert_eq!(d.base_url(), "http://localhost:8001");
    assert_that!(d.kind.as_str(), eq("rest"));
    assert!(!d.is_load_balanced());
}

#[test]
fn given_zero_instances_when_configured_then_clamped_to_one() {
    let d = descriptor("user", 8001, 0);
    assert_that!(d.instances, eq(1));
}

#[test]
fn given_command_line_when_parsed_then_program_and_args_split() {
    // When
    let cmd = LaunchCommand::from_command_line("  python user_service/server.py --reload ").unwrap();

    // Then
    assert_that!(cmd.program.as_str(), eq("python"));
    assert_eq!(cmd.args, vec!["user_service/server.py", "--reload"]);
    assert_eq!(cmd.to_string(), "python user_service/server.py --reload");
}

#[test]
fn given_blank_command_line_when_parsed_then_none() {
    assert!(LaunchCommand::from_command_line("   ").is_none());
}

#[test]
fn test_process_handle_display() {
    assert_eq!(ProcessHandle::new(4242).to_string(), "pid:4242");
}
