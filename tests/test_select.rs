// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 rendez contributors

use std::thread;
use std::time::Duration;

use rendez::channel::Channel;
use rendez::error::SelectStatus;
use rendez::{select, SelectCase};

#[test]
fn select_returns_immediately_when_a_case_is_already_ready() {
    let a: Channel<i32> = Channel::create(1).unwrap();
    let b: Channel<i32> = Channel::create(1).unwrap();
    b.send(1).unwrap();

    let result = select(vec![SelectCase::Receive(&a), SelectCase::Receive(&b)]);
    assert_eq!(result.outcome.index, 1);
    assert_eq!(result.payload, Some(1));
}

#[test]
fn select_blocks_until_a_channel_becomes_ready() {
    let a: Channel<i32> = Channel::create(0).unwrap();
    let b: Channel<i32> = Channel::create(0).unwrap();

    let sender = a.clone();
    let handle = thread::spawn(move || {
        thread::sleep(Duration::from_millis(75));
        sender.send(3).unwrap();
    });

    let result = select(vec![SelectCase::Receive(&a), SelectCase::Receive(&b)]);
    assert_eq!(result.outcome.index, 0);
    assert_eq!(result.payload, Some(3));
    handle.join().unwrap();
}

#[test]
fn select_prefers_the_first_ready_index_on_ties() {
    let a: Channel<i32> = Channel::create(1).unwrap();
    let b: Channel<i32> = Channel::create(1).unwrap();
    a.send(1).unwrap();
    b.send(2).unwrap();

    let result = select(vec![SelectCase::Receive(&a), SelectCase::Receive(&b)]);
    assert_eq!(result.outcome.index, 0);
    assert_eq!(result.outcome.status, SelectStatus::Success);
}

#[test]
fn select_terminates_on_a_channel_closing_mid_wait() {
    let a: Channel<i32> = Channel::create(0).unwrap();
    let b: Channel<i32> = Channel::create(0).unwrap();

    let closer = b.clone();
    let handle = thread::spawn(move || {
        thread::sleep(Duration::from_millis(50));
        closer.close().unwrap();
    });

    let result = select(vec![SelectCase::Receive(&a), SelectCase::Receive(&b)]);
    assert_eq!(result.outcome.index, 1);
    assert_eq!(result.outcome.status, SelectStatus::Closed);
    handle.join().unwrap();
}

#[test]
fn select_send_case_completes_against_a_waiting_receiver() {
    let chan: Channel<i32> = Channel::create(0).unwrap();
    let receiver = chan.clone();
    let handle = thread::spawn(move || receiver.receive());

    thread::sleep(Duration::from_millis(50));
    let result = select(vec![SelectCase::Send(&chan, 11)]);
    assert_eq!(result.outcome.status, SelectStatus::Success);
    assert_eq!(handle.join().unwrap(), Ok(11));
}
