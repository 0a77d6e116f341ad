//! Integration tests for the connection lifecycle.
//!
//! Connecting, registering, leaving cleanly with EXI, and dropping the
//! socket without warning.

mod common;

use std::sync::Arc;

use common::TestServer;
use relay_proto::ServerCommand;
use relayd::{Config, Gateway, Registry};
use tokio::net::TcpListener;

#[tokio::test]
async fn test_basic_registration() {
    let server = TestServer::spawn().await.expect("Failed to spawn test server");
    let mut client = server.connect().await.expect("Failed to connect");

    client.register("Ana").await.expect("Registration failed");
    assert_eq!(client.roster().await.unwrap(), vec!["Ana"]);
}

#[tokio::test]
async fn test_exit_announces_and_closes() {
    let server = TestServer::spawn().await.unwrap();
    let mut ana = server.join("Ana").await.unwrap();
    let mut luis = server.join("Luis").await.unwrap();
    assert_eq!(ana.recv().await.unwrap(), ServerCommand::Con("Luis".into()));

    ana.quit().await.unwrap();
    ana.expect_closed().await.expect("server should close after EXI");

    assert_eq!(luis.recv().await.unwrap(), ServerCommand::Exi("Ana".into()));
    assert_eq!(luis.roster().await.unwrap(), vec!["Luis"]);
}

#[tokio::test]
async fn test_abrupt_disconnect_is_a_leave() {
    let server = TestServer::spawn().await.unwrap();
    let ana = server.join("Ana").await.unwrap();
    let mut luis = server.join("Luis").await.unwrap();

    drop(ana);

    assert_eq!(luis.recv().await.unwrap(), ServerCommand::Exi("Ana".into()));
    // Exactly one leave notice: the roster reply comes next.
    assert_eq!(luis.roster().await.unwrap(), vec!["Luis"]);
}

#[tokio::test]
async fn test_name_reusable_after_leave() {
    let server = TestServer::spawn().await.unwrap();
    let mut first = server.join("Ana").await.unwrap();
    first.quit().await.unwrap();
    first.expect_closed().await.unwrap();

    let mut second = server.join("Ana").await.expect("name should be free again");
    assert_eq!(second.roster().await.unwrap(), vec!["Ana"]);
}

#[tokio::test]
async fn test_unregistered_disconnect_is_silent() {
    let server = TestServer::spawn().await.unwrap();
    let mut luis = server.join("Luis").await.unwrap();

    let mut stranger = server.connect().await.unwrap();
    stranger.quit().await.unwrap();
    stranger.expect_closed().await.unwrap();

    let lurker = server.connect().await.unwrap();
    drop(lurker);

    // No EXI for sessions that never registered.
    assert_eq!(luis.roster().await.unwrap(), vec!["Luis"]);
}

#[tokio::test]
async fn test_bind_to_taken_port_fails() {
    let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();

    let mut config = Config::default();
    config.listen.address = taken.local_addr().unwrap();

    let result = Gateway::bind(&config, Arc::new(Registry::new())).await;
    assert!(result.is_err(), "binding an address in use must fail");
}
