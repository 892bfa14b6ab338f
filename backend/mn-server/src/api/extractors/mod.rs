pub mod caller_role;
