mod caller_role;
