use battleship_arena::transport::tcp::TcpTransport;
use battleship_arena::transport::{is_peer_closed, Transport};
use battleship_arena::{Message, RandomBot, Skeleton, PROTOCOL_VERSION};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::time::Duration;

#[tokio::test(flavor = "multi_thread")]
async fn test_oversized_length_prefix() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let server_task = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        socket.write_all(&[0xFF, 0xFF, 0xFF, 0xFF]).await.unwrap();
        socket.flush().await.unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
    });

    let mut transport = TcpTransport::connect(addr).await?;
    let err = transport.recv().await.unwrap_err();
    assert!(err.to_string().contains("too large"), "{}", err);

    server_task.await?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_zero_length_frame() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let server_task = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        socket.write_all(&[0u8, 0, 0, 0]).await.unwrap();
        socket.flush().await.unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
    });

    let mut transport = TcpTransport::connect(addr).await?;
    assert!(transport.recv().await.is_err());

    server_task.await?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_truncated_frame() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let server_task = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        // promises 100 bytes, delivers 3, then hangs up
        socket.write_all(&100u32.to_be_bytes()).await.unwrap();
        socket.write_all(&[1, 2, 3]).await.unwrap();
        socket.flush().await.unwrap();
    });

    let mut transport = TcpTransport::connect(addr).await?;
    let err = transport.recv().await.unwrap_err();
    assert!(err.to_string().contains("closed mid-frame"), "{}", err);
    assert!(!is_peer_closed(&err));

    server_task.await?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_frame_layout() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let server_task = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut len = [0u8; 4];
        socket.read_exact(&mut len).await.unwrap();
        let mut body = vec![0u8; u32::from_be_bytes(len) as usize];
        socket.read_exact(&mut body).await.unwrap();
        bincode::deserialize::<Message>(&body).unwrap()
    });

    let mut transport = TcpTransport::connect(addr).await?;
    let hello = Message::Hello {
        version: PROTOCOL_VERSION,
    };
    transport.send(hello.clone()).await?;
    assert_eq!(server_task.await?, hello);
    Ok(())
}

async fn write_frame(socket: &mut tokio::net::TcpStream, body: &[u8]) {
    socket
        .write_all(&(body.len() as u32).to_be_bytes())
        .await
        .unwrap();
    socket.write_all(body).await.unwrap();
    socket.flush().await.unwrap();
}

async fn handshake(socket: &mut tokio::net::TcpStream) {
    let hello = bincode::serialize(&Message::Hello {
        version: PROTOCOL_VERSION,
    })
    .unwrap();
    write_frame(socket, &hello).await;
    let mut len = [0u8; 4];
    socket.read_exact(&mut len).await.unwrap();
    let mut body = vec![0u8; u32::from_be_bytes(len) as usize];
    socket.read_exact(&mut body).await.unwrap();
    assert!(matches!(
        bincode::deserialize::<Message>(&body).unwrap(),
        Message::Hello { .. }
    ));
}

fn spawn_skeleton(listener: TcpListener) -> tokio::task::JoinHandle<anyhow::Result<()>> {
    tokio::spawn(async move {
        let (socket, _) = listener.accept().await?;
        let mut skeleton = Skeleton::new(RandomBot::from_seed("bot", 1), TcpTransport::new(socket));
        skeleton.run().await
    })
}

#[tokio::test(flavor = "multi_thread")]
async fn skeleton_reports_garbage_frame() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let server = spawn_skeleton(listener);

    let mut socket = tokio::net::TcpStream::connect(addr).await?;
    handshake(&mut socket).await;
    write_frame(&mut socket, &[0xFF; 5]).await;

    let err = server.await?.unwrap_err();
    assert!(err.to_string().contains("Deserialization"), "{}", err);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn skeleton_ends_cleanly_when_peer_hangs_up() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let server = spawn_skeleton(listener);

    let mut socket = tokio::net::TcpStream::connect(addr).await?;
    handshake(&mut socket).await;
    drop(socket);

    server.await??;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn clean_close_is_distinguished_from_truncation() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let server_task = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        drop(socket);
    });

    let mut transport = TcpTransport::connect(addr).await?;
    let err = transport.recv().await.unwrap_err();
    assert!(is_peer_closed(&err), "{}", err);

    server_task.await?;
    Ok(())
}
