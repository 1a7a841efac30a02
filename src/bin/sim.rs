use battleship_arena::{
    init_logging, run_match, InMemoryTransport, PlayerId, PlayerPair, RandomBot, Skeleton, Stub,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <seed1> <seed2>", args[0]);
        std::process::exit(1);
    }
    let seed1: u64 = args[1].parse()?;
    let seed2: u64 = args[2].parse()?;

    let (client1, server1) = InMemoryTransport::pair();
    let (client2, server2) = InMemoryTransport::pair();
    let mut skeleton1 = Skeleton::new(RandomBot::from_seed("player1", seed1), server1);
    let mut skeleton2 = Skeleton::new(RandomBot::from_seed("player2", seed2), server2);
    let bot1 = tokio::spawn(async move { skeleton1.run().await });
    let bot2 = tokio::spawn(async move { skeleton2.run().await });

    let players = PlayerPair::new(PlayerId::new("player1"), PlayerId::new("player2"))
        .ok_or_else(|| anyhow::anyhow!("player ids must differ"))?;
    let game_id = format!("sim-{}-{}", seed1, seed2);
    let record = {
        let mut stub1 = Stub::new(client1);
        let mut stub2 = Stub::new(client2);
        run_match(&game_id, players, &mut stub1, &mut stub2).await
    };

    // stubs are dropped, so both skeletons see their channel close
    bot1.await??;
    bot2.await??;

    println!("{}", serde_json::to_string(&record)?);
    Ok(())
}
