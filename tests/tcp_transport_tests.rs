use battleship_arena::transport::tcp::TcpTransport;
use battleship_arena::{
    run_match, serve, BotApi, LogEntry, PlayerId, PlayerPair, RandomBot, Skeleton, Stub,
};
use tokio::net::TcpListener;

#[tokio::test(flavor = "multi_thread")]
async fn test_stub_skeleton_tcp() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let server = tokio::spawn(async move {
        let (socket, _) = listener.accept().await?;
        let mut skeleton = Skeleton::new(RandomBot::from_seed("bot", 11), TcpTransport::new(socket));
        skeleton.run().await
    });

    let mut stub = Stub::new(TcpTransport::connect(addr).await?);
    let field = stub.get_field("tcp").await?;
    assert_eq!(field.grid.lines().count(), 10);
    let strike = stub.get_strike("tcp", &[], &[]).await?;
    assert!(strike.in_bounds());

    drop(stub);
    server.await??;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn served_bots_play_a_match() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let mut seed = 0;
    let service = tokio::spawn(serve(listener, move || {
        seed += 1;
        RandomBot::from_seed("served", seed)
    }));

    let mut first = Stub::new(TcpTransport::connect(addr).await?);
    let mut second = Stub::new(TcpTransport::connect(addr).await?);
    let players = PlayerPair::new(PlayerId::new("north"), PlayerId::new("south")).unwrap();
    let record = run_match("tcp-match", players, &mut first, &mut second).await;

    assert!(record.winner.is_some());
    assert!(matches!(
        record.log.get(0),
        Some(LogEntry::PlacementSnapshot { player_id, .. }) if player_id.as_str() == "north"
    ));
    assert!(matches!(
        record.log.entries().last(),
        Some(LogEntry::GameOver { .. })
    ));

    service.abort();
    Ok(())
}
