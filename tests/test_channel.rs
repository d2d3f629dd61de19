// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 rendez contributors

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use rendez::channel::Channel;
use rendez::error::{CloseError, RecvError};

#[test]
fn buffered_channel_holds_up_to_capacity() {
    let chan: Channel<i32> = Channel::create(2).unwrap();
    chan.send(10).unwrap();
    chan.send(20).unwrap();
    assert_eq!(chan.len(), 2);
    assert_eq!(chan.receive().unwrap(), 10);
    assert_eq!(chan.receive().unwrap(), 20);
    assert!(chan.is_empty());
}

#[test]
fn capacity_zero_channel_rendezvous_handoff() {
    let chan: Channel<i32> = Channel::create(0).unwrap();
    let receiver = chan.clone();
    let handle = thread::spawn(move || receiver.receive());

    thread::sleep(Duration::from_millis(50));
    chan.send(5).unwrap();

    assert_eq!(handle.join().unwrap(), Ok(5));
}

#[test]
fn closing_wakes_every_blocked_receiver_with_closed_error() {
    let chan: Channel<i32> = Channel::create(0).unwrap();
    let woken = Arc::new(AtomicUsize::new(0));
    let mut handles = Vec::new();

    for _ in 0..8 {
        let c = chan.clone();
        let woken = Arc::clone(&woken);
        handles.push(thread::spawn(move || {
            let result = c.receive();
            woken.fetch_add(1, Ordering::SeqCst);
            result
        }));
    }

    thread::sleep(Duration::from_millis(50));
    chan.close().unwrap();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), Err(RecvError));
    }
    assert_eq!(woken.load(Ordering::SeqCst), 8);
}

#[test]
fn closing_twice_reports_already_closed() {
    let chan: Channel<i32> = Channel::create(1).unwrap();
    chan.close().unwrap();
    assert_eq!(chan.close(), Err(CloseError));
}

#[test]
fn send_and_receive_are_fifo_across_threads() {
    let chan: Channel<i32> = Channel::create(4).unwrap();
    let sender = chan.clone();
    let producer = thread::spawn(move || {
        for i in 0..100 {
            sender.send(i).unwrap();
        }
    });

    let mut received = Vec::new();
    for _ in 0..100 {
        received.push(chan.receive().unwrap());
    }
    producer.join().unwrap();

    assert_eq!(received, (0..100).collect::<Vec<_>>());
}

#[test]
fn destroy_requires_close_first() {
    let chan: Channel<i32> = Channel::create(1).unwrap();
    assert!(chan.destroy().is_err());
    chan.close().unwrap();
    assert!(chan.destroy().is_ok());
}
