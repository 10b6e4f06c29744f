#![cfg(feature = "blocking")]

use mockito::Matcher;
use rs_alks::blocking::Client;
use rs_alks::{AlksError, ClientConfig, ErrorKind};
use serde_json::json;

fn test_config(base_url: String) -> ClientConfig {
    ClientConfig::new()
        .with_base_url(base_url)
        .with_userid("testuser")
        .with_password("testpass")
}

fn test_client(base_url: String) -> Client {
    Client::with_config(test_config(base_url)).expect("failed to build client")
}

#[test]
fn blocking_get_keys_success() {
    let mut server = mockito::Server::new();

    let mock = server
        .mock("POST", "/getKeys/")
        .match_header("Content-Type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "userid": "testuser",
            "account": "anAccount",
            "role": "PowerUser",
            "sessionTime": 2
        })))
        .with_status(200)
        .with_body(
            json!({"accessKey": "foo", "secretKey": "bar", "sessionToken": "baz", "statusMessage": "Success"})
                .to_string(),
        )
        .create();

    let creds = test_client(server.url())
        .get_keys(
            ClientConfig::new()
                .with_account("anAccount")
                .with_role("PowerUser")
                .with_session_time(2),
        )
        .expect("get_keys should succeed");

    assert_eq!(creds.access_key, "foo");
    assert_eq!(creds.secret_key, "bar");
    assert_eq!(creds.session_token, "baz");

    mock.assert();
}

#[test]
fn blocking_get_accounts_success() {
    let mut server = mockito::Server::new();

    let mock = server
        .mock("POST", "/getAccounts/")
        .with_status(200)
        .with_body(
            json!({
                "statusMessage": "Success",
                "accountListRole": {
                    "1234 - foobar": [{"account": "1234", "role": "role1", "iamKeyActive": true}],
                    "2345 - foobar": [{"account": "2345", "role": "role2", "iamKeyActive": false}]
                }
            })
            .to_string(),
        )
        .create();

    let accounts = test_client(server.url())
        .get_accounts(ClientConfig::default())
        .expect("get_accounts should succeed");

    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[0].account, "1234 - foobar");
    assert!(accounts[0].iam_key_active);
    assert_eq!(accounts[1].role, "role2");

    mock.assert();
}

#[test]
fn blocking_create_role_and_delete_role() {
    let mut server = mockito::Server::new();

    let create = server
        .mock("POST", "/createRole/")
        .with_status(200)
        .with_body(
            json!({
                "roleArn": "aRoleArn",
                "denyArns": "denyArn1",
                "instanceProfileArn": "anInstanceProfileArn",
                "addedRoleToInstanceProfile": false
            })
            .to_string(),
        )
        .create();
    let delete = server
        .mock("POST", "/deleteRole/")
        .with_status(200)
        .with_body(json!({"statusMessage": "Success"}).to_string())
        .create();

    let client = test_client(server.url()).create(
        test_config(server.url())
            .with_account("anAccount")
            .with_role_name("awsRoleName"),
    );

    let role = client
        .create_role(ClientConfig::new().with_role_type("Amazon EC2"))
        .expect("create_role should succeed");
    assert_eq!(role.deny_arns, vec!["denyArn1"]);
    assert!(!role.added_role_to_instance_profile);

    assert!(client.delete_role(ClientConfig::default()).unwrap());

    create.assert();
    delete.assert();
}

#[test]
fn blocking_get_account_role_not_found() {
    let mut server = mockito::Server::new();

    let mock = server
        .mock("POST", "/getAccountRole/")
        .with_status(200)
        .with_body(json!({"roleARN": null, "roleExists": false}).to_string())
        .create();

    let err = test_client(server.url())
        .get_account_role(ClientConfig::new().with_role_name("awsRoleName"))
        .unwrap_err();

    match err {
        AlksError::NotFound(msg) => {
            assert_eq!(msg, "Role awsRoleName does not exist in this account")
        }
        other => panic!("expected AlksError::NotFound, got: {other:?}"),
    }

    mock.assert();
}

#[test]
fn blocking_errors_array() {
    let mut server = mockito::Server::new();

    let mock = server
        .mock("POST", "/listAWSAccountRoles/")
        .with_status(400)
        .with_body(json!({"errors": ["account is required"]}).to_string())
        .create();

    let err = test_client(server.url())
        .list_aws_account_roles(ClientConfig::default())
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Service);
    assert_eq!(err.to_string(), "account is required");

    mock.assert();
}

#[test]
fn blocking_server_error() {
    let mut server = mockito::Server::new();

    let mock = server.mock("POST", "/getAWSRoleTypes/").with_status(500).create();

    let err = test_client(server.url())
        .get_aws_role_types(ClientConfig::default())
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Status);
    assert_eq!(err.to_string(), "Internal Server Error");

    mock.assert();
}
