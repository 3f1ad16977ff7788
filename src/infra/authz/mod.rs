pub mod role_authorizer;
