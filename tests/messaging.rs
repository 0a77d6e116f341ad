//! Integration tests for chat, private messages and the roster.

mod common;

use common::TestServer;
use relay_proto::{ClientCommand, MAX_FRAME_LEN, ServerCommand};

fn cht(from: &str, text: &str) -> ServerCommand {
    ServerCommand::Cht {
        from: from.into(),
        text: text.into(),
    }
}

fn prv(from: &str, text: &str) -> ServerCommand {
    ServerCommand::Prv {
        from: from.into(),
        text: text.into(),
    }
}

#[tokio::test]
async fn test_broadcast_reaches_everyone_in_order() {
    let server = TestServer::spawn().await.unwrap();
    let mut ana = server.join("Ana").await.unwrap();
    let mut luis = server.join("Luis").await.unwrap();
    let mut bea = server.join("Bea").await.unwrap();
    ana.recv_until(|m| *m == ServerCommand::Con("Bea".into()))
        .await
        .unwrap();
    luis.recv().await.unwrap();

    for i in 0..20 {
        ana.send(ClientCommand::Msg(format!("mensaje {i}")))
            .await
            .unwrap();
    }

    for client in [&mut ana, &mut luis, &mut bea] {
        for i in 0..20 {
            assert_eq!(
                client.recv().await.unwrap(),
                cht("Ana", &format!("mensaje {i}"))
            );
        }
    }
}

#[tokio::test]
async fn test_text_is_verbatim() {
    let server = TestServer::spawn().await.unwrap();
    let mut ana = server.join("Ana").await.unwrap();

    let text = "  ¿qué tal?  con  espacios, comas y ñ ";
    ana.send(ClientCommand::Msg(text.into())).await.unwrap();
    assert_eq!(ana.recv().await.unwrap(), cht("Ana", text));
}

#[tokio::test]
async fn test_private_round_trip() {
    let server = TestServer::spawn().await.unwrap();
    let mut ana = server.join("Ana").await.unwrap();
    let mut luis = server.join("Luis").await.unwrap();
    let mut bea = server.join("Bea").await.unwrap();
    ana.recv_until(|m| *m == ServerCommand::Con("Bea".into()))
        .await
        .unwrap();
    luis.recv().await.unwrap();

    ana.send(ClientCommand::Prv {
        target: "Luis".into(),
        text: "hola que tal".into(),
    })
    .await
    .unwrap();

    assert_eq!(luis.recv().await.unwrap(), prv("Ana", "hola que tal"));
    assert_eq!(ana.recv().await.unwrap(), prv("Ana", "hola que tal"));

    // Exactly one each, and nothing for the bystander.
    assert_eq!(luis.roster().await.unwrap(), vec!["Ana", "Luis", "Bea"]);
    assert_eq!(ana.roster().await.unwrap(), vec!["Ana", "Luis", "Bea"]);
    assert_eq!(bea.roster().await.unwrap(), vec!["Ana", "Luis", "Bea"]);
}

#[tokio::test]
async fn test_private_to_self_or_absent_is_silent() {
    let server = TestServer::spawn().await.unwrap();
    let mut ana = server.join("Ana").await.unwrap();

    ana.send_raw("PRV Ana me hablo a mi").await.unwrap();
    ana.send_raw("PRV Nadie hola").await.unwrap();

    assert_eq!(ana.roster().await.unwrap(), vec!["Ana"]);
}

#[tokio::test]
async fn test_roster_tracks_membership() {
    let server = TestServer::spawn().await.unwrap();
    let mut zoe = server.join("Zoe").await.unwrap();
    let mut ana = server.join("Ana").await.unwrap();
    let _luis = server.join("Luis").await.unwrap();

    zoe.recv_until(|m| *m == ServerCommand::Con("Luis".into()))
        .await
        .unwrap();
    assert_eq!(zoe.roster().await.unwrap(), vec!["Zoe", "Ana", "Luis"]);

    ana.quit().await.unwrap();
    ana.expect_closed().await.unwrap();
    assert_eq!(zoe.recv().await.unwrap(), ServerCommand::Exi("Ana".into()));
    assert_eq!(zoe.roster().await.unwrap(), vec!["Zoe", "Luis"]);
}

#[tokio::test]
async fn test_malformed_input_is_ignored() {
    let server = TestServer::spawn_with("[limits]\nmax_frame_len = 64")
        .await
        .unwrap();
    let mut ana = server.join("Ana").await.unwrap();

    ana.send_raw("").await.unwrap();
    ana.send_raw("HELLO").await.unwrap();
    ana.send_raw("msg lowercase").await.unwrap();
    ana.send_raw("LUS extra").await.unwrap();
    ana.send_raw("MSG").await.unwrap();
    ana.send_raw("PRV Luis").await.unwrap();
    ana.send_raw("PRV Lu!s hola").await.unwrap();
    // Not UTF-8.
    ana.send_bytes(&[0x00, 0x03, b'M', 0xff, b'G']).await.unwrap();
    // Longer than the configured frame limit.
    let long = format!("MSG {}", "x".repeat(100));
    ana.send_raw(&long).await.unwrap();

    ana.send(ClientCommand::Msg("sigo aqui".into())).await.unwrap();
    assert_eq!(ana.recv().await.unwrap(), cht("Ana", "sigo aqui"));
}

#[tokio::test]
async fn test_full_frame_message_is_refused_with_nok() {
    let server = TestServer::spawn().await.unwrap();
    let mut ana = server.join("Ana").await.unwrap();
    let mut luis = server.join("Luis").await.unwrap();
    assert_eq!(ana.recv().await.unwrap(), ServerCommand::Con("Luis".into()));

    // Fills the incoming frame; the CHT would not fit in an outgoing one.
    let text = "x".repeat(MAX_FRAME_LEN - "MSG ".len());
    ana.send(ClientCommand::Msg(text)).await.unwrap();
    assert_eq!(
        ana.recv().await.unwrap(),
        ServerCommand::Nok("message too long".into())
    );

    let text = "x".repeat(MAX_FRAME_LEN - "PRV Ana ".len());
    luis.send(ClientCommand::Prv {
        target: "Ana".into(),
        text,
    })
    .await
    .unwrap();
    assert_eq!(
        luis.recv().await.unwrap(),
        ServerCommand::Nok("message too long".into())
    );

    // Nobody got a notice, and both connections are still usable.
    luis.send(ClientCommand::Msg("hola".into())).await.unwrap();
    assert_eq!(ana.recv().await.unwrap(), cht("Luis", "hola"));
    assert_eq!(luis.recv().await.unwrap(), cht("Luis", "hola"));
}
