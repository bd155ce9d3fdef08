//! Upstream contract round-trip against the live mock upstream.
//!
//! # Design
//! Starts `mock_upstream` on a random port, then exercises every core
//! build/parse pair over real HTTP using ureq. Catches drift between the
//! core's wire DTOs and the mock's independently defined bodies.

use deck_core::{HttpRequest, HttpResponse, UpstreamClient, UpstreamError};

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`.
fn execute(req: HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut request = agent.get(&req.url);
    for (name, value) in &req.headers {
        request = request.header(name.as_str(), value.as_str());
    }
    let mut response = request.call().expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse {
        status,
        headers: Vec::new(),
        body,
    }
}

#[test]
fn deck_round_trip() {
    // Step 1: start mock upstream on a random port.
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_upstream::run(listener).await
        })
        .unwrap();
    });

    let client = UpstreamClient::new(&format!("http://{addr}/api/")).unwrap();

    // Step 2: two decks.
    let deck = client.parse_deck(execute(client.build_new_deck(2))).unwrap();
    assert!(deck.success);
    assert!(deck.shuffled);
    assert_eq!(deck.remaining, 104);
    let id = deck.deck_id;

    // Step 3: draw three.
    let drawn = client.parse_draw(execute(client.build_draw(&id, 3))).unwrap();
    assert_eq!(drawn.deck_id, id);
    assert_eq!(drawn.cards.len(), 3);
    assert_eq!(drawn.remaining, 101);

    // Step 4: shuffle keeps what is left.
    let shuffled = client.parse_deck(execute(client.build_shuffle(&id))).unwrap();
    assert_eq!(shuffled.deck_id, id);
    assert_eq!(shuffled.remaining, 101);

    // Step 5: a full 52 still fits, the next one does not.
    let drawn = client.parse_draw(execute(client.build_draw(&id, 52))).unwrap();
    assert_eq!(drawn.remaining, 49);
    let err = client.parse_draw(execute(client.build_draw(&id, 52))).unwrap_err();
    assert!(matches!(err, UpstreamError::Rejected(Some(_))));

    // Step 6: unknown deck is a status error.
    let err = client.parse_deck(execute(client.build_shuffle("missing"))).unwrap_err();
    assert!(matches!(err, UpstreamError::Status { status: 404, .. }));
}
