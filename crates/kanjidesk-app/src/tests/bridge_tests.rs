use std::time::Duration;

use kanjidesk_types::{Command, DatabaseState, Notification};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::time::timeout;

use crate::bridge::WorkerBridge;

#[tokio::test]
async fn commands_are_written_as_json_lines() {
    let (bridge, handle) = WorkerBridge::new();
    let (worker_stdin, mut worker_side) = tokio::io::duplex(4096);

    let send = async move {
        handle.commands_tx.send(Command::update()).await.expect("send failed");
        handle
            .commands_tx
            .send(Command::query(["漢", "字"]))
            .await
            .expect("send failed");
        // Dropping the handle closes the channel and ends the forwarder
    };

    let (forwarded, ()) = tokio::join!(bridge.forward_to_worker(worker_stdin), send);
    forwarded.unwrap();

    let mut written = String::new();
    worker_side.read_to_string(&mut written).await.unwrap();
    assert_eq!(
        written,
        "{\"type\":\"update\"}\n{\"type\":\"query\",\"kanji\":[\"漢\",\"字\"]}\n"
    );
}

#[tokio::test]
async fn worker_lines_are_forwarded_in_order() {
    let (bridge, handle) = WorkerBridge::new();
    let (mut worker_stdout, reader) = tokio::io::duplex(4096);

    let ok = Notification::db_state_updated(DatabaseState::Ok).to_json().unwrap();
    let output = format!("{ok}\n\nnot json at all\n{{\"type\":\"queryresult\",\"results\":[]}}\n");
    worker_stdout.write_all(output.as_bytes()).await.unwrap();
    drop(worker_stdout);

    timeout(Duration::from_secs(2), bridge.forward_from_worker(reader))
        .await
        .expect("forwarder hung")
        .unwrap();

    let mut lines = Vec::new();
    while let Ok(Some(line)) = handle.notifications_rx.try_recv() {
        lines.push(line);
    }
    // Blank lines skipped, bad lines passed through for the shell to reject
    assert_eq!(
        lines,
        [
            ok.as_str(),
            "not json at all",
            "{\"type\":\"queryresult\",\"results\":[]}"
        ]
    );
}

#[tokio::test]
async fn callbacks_post_from_sync_context_in_order() {
    let (bridge, handle) = WorkerBridge::new();

    // What a button callback does: no await available
    let tx = handle.commands_tx;
    let button_click = move |command: Command| {
        tx.try_send(command).expect("send failed");
    };
    button_click(Command::update());
    button_click(Command::cancel_update());
    button_click(Command::destroy());
    drop(button_click);

    let (worker_stdin, mut worker_side) = tokio::io::duplex(4096);
    timeout(Duration::from_secs(2), bridge.forward_to_worker(worker_stdin))
        .await
        .expect("forwarder hung")
        .unwrap();

    let mut written = String::new();
    worker_side.read_to_string(&mut written).await.unwrap();
    let kinds: Vec<_> = written
        .lines()
        .map(|line| Command::decode(line).unwrap().kind())
        .collect();
    assert_eq!(kinds, ["update", "cancelupdate", "destroy"]);
}

#[tokio::test]
async fn invalid_utf8_line_is_dropped_and_forwarding_continues() {
    let (bridge, handle) = WorkerBridge::new();
    let (mut worker_stdout, reader) = tokio::io::duplex(4096);

    let ok = Notification::db_state_updated(DatabaseState::Ok).to_json().unwrap();
    worker_stdout.write_all(b"\xff\xfe garbage\n").await.unwrap();
    worker_stdout.write_all(format!("{ok}\r\n").as_bytes()).await.unwrap();
    drop(worker_stdout);

    timeout(Duration::from_secs(2), bridge.forward_from_worker(reader))
        .await
        .expect("forwarder hung")
        .unwrap();

    let mut lines = Vec::new();
    while let Ok(Some(line)) = handle.notifications_rx.try_recv() {
        lines.push(line);
    }
    assert_eq!(lines, [ok]);
}
