//! Integration tests for the host → framed pipe → handler → host flow.

use alitecs_adr::adr::DecisionResult;
use alitecs_adr::adr::tables::REQUIRED_HISTORY_COUNT;
use alitecs_adr::config::{PluginConfig, WireFormat};
use alitecs_adr::handler::AlitecsHandler;
use alitecs_adr::plugin::protocol::{PluginRequest, PluginResponse};
use alitecs_adr::plugin::server::PluginServer;

use crate::mock_host::{MockHost, TrickleReader, eu868_request, steady_history};

fn server(config: &PluginConfig) -> PluginServer<AlitecsHandler> {
    PluginServer::new(AlitecsHandler::new(config), config)
}

#[test]
fn identify_then_decide_over_json() {
    let config = PluginConfig::default();
    let mut host = MockHost::new(WireFormat::Json);
    host.send(&PluginRequest::Id)
        .send(&PluginRequest::Name)
        .send(&PluginRequest::Handle(eu868_request(steady_history(5, 0.0, 0))));

    let mut written = Vec::new();
    let stats = server(&config).serve(host.bytes(), &mut written).unwrap();

    assert_eq!(stats.frames_in, 3);
    assert_eq!(stats.decisions, 1);
    assert_eq!(stats.errors, 0);
    assert_eq!(
        host.responses(&written),
        vec![
            PluginResponse::Id("alitecs-adr".into()),
            PluginResponse::Name("ALITECS ADR algorithm".into()),
            PluginResponse::Handle(DecisionResult {
                data_rate: 3,
                tx_power_index: 0,
                nb_trans: 1,
            }),
        ]
    );
}

#[test]
fn postcard_wire_format_round_trips() {
    let config = PluginConfig {
        wire_format: WireFormat::Postcard,
        ..PluginConfig::default()
    };
    let mut host = MockHost::new(WireFormat::Postcard);
    let mut req = eu868_request(steady_history(REQUIRED_HISTORY_COUNT, -22.0, 3));
    req.data_rate = 4;
    req.tx_power_index = 3;
    host.send(&PluginRequest::Handle(req));

    let mut written = Vec::new();
    server(&config).serve(host.bytes(), &mut written).unwrap();

    assert_eq!(
        host.responses(&written),
        vec![PluginResponse::Handle(DecisionResult {
            data_rate: 3,
            tx_power_index: 0,
            nb_trans: 1,
        })]
    );
}

#[test]
fn partial_reads_still_yield_every_response() {
    let config = PluginConfig::default();
    let mut host = MockHost::new(WireFormat::Json);
    for _ in 0..4 {
        host.send(&PluginRequest::Id);
    }

    let mut written = Vec::new();
    let reader = TrickleReader::new(host.bytes(), 3);
    let stats = server(&config).serve(reader, &mut written).unwrap();

    assert_eq!(stats.frames_in, 4);
    assert_eq!(host.responses(&written).len(), 4);
}

#[test]
fn garbage_frame_gets_error_and_stream_continues() {
    let config = PluginConfig::default();
    let mut host = MockHost::new(WireFormat::Json);
    let junk = b"not a request";
    let mut framed = (junk.len() as u32).to_le_bytes().to_vec();
    framed.extend_from_slice(junk);
    host.send_raw(&framed).send(&PluginRequest::Name);

    let mut written = Vec::new();
    let stats = server(&config).serve(host.bytes(), &mut written).unwrap();

    let responses = host.responses(&written);
    assert_eq!(responses.len(), 2);
    assert!(matches!(responses[0], PluginResponse::Error(_)));
    assert_eq!(responses[1], PluginResponse::Name("ALITECS ADR algorithm".into()));
    assert_eq!(stats.errors, 1);
}

#[test]
fn oversize_frame_is_rejected_and_next_request_answered() {
    let config = PluginConfig::default();
    let mut host = MockHost::new(WireFormat::Json);
    let len = config.max_frame_size + 1;
    host.send_raw(&(len as u32).to_le_bytes())
        .send_raw(&vec![b'x'; len])
        .send(&PluginRequest::Id);

    let mut written = Vec::new();
    let reader = TrickleReader::new(host.bytes(), 700);
    let stats = server(&config).serve(reader, &mut written).unwrap();

    assert_eq!(
        host.responses(&written),
        vec![
            PluginResponse::Error("frame exceeds size limit".into()),
            PluginResponse::Id("alitecs-adr".into()),
        ]
    );
    assert_eq!(stats.frames_in, 2);
    assert_eq!(stats.errors, 1);
}

#[test]
fn kill_switch_config_turns_every_decision_into_passthrough() {
    let config = PluginConfig::from_json(br#"{"force_adr_disabled": true}"#).unwrap();
    let mut host = MockHost::new(WireFormat::Json);
    let mut req = eu868_request(steady_history(REQUIRED_HISTORY_COUNT, 20.0, 0));
    req.data_rate = 1;
    req.nb_trans = 2;
    host.send(&PluginRequest::Handle(req));

    let mut written = Vec::new();
    server(&config).serve(host.bytes(), &mut written).unwrap();

    assert_eq!(
        host.responses(&written),
        vec![PluginResponse::Handle(DecisionResult {
            data_rate: 1,
            tx_power_index: 0,
            nb_trans: 2,
        })]
    );
}

#[test]
fn empty_input_serves_nothing() {
    let config = PluginConfig::default();
    let mut written = Vec::new();
    let stats = server(&config).serve(&b""[..], &mut written).unwrap();
    assert_eq!(stats.frames_in, 0);
    assert!(written.is_empty());
}
