use kitna_core::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn builtin_text_models_price_a_paragraph() {
    let catalog = Catalog::builtin();
    let text = "Kitna estimates what a prompt will cost before you send it.\nIt is a heuristic.";
    let tokens = estimate_tokens(text);
    assert!(tokens > 0);

    for model in catalog.models(InputMode::Text) {
        let cost = calculate_cost(tokens as f64, InputMode::Text, &model).unwrap();
        assert!(close(cost, tokens as f64 / 1000.0 * model.input_price()));
    }
}

#[test]
fn google_speech_prices_an_hour() {
    let catalog = Catalog::builtin();
    let model = catalog.find(InputMode::Voice, "google-speech").unwrap();
    let cost = calculate_cost(12_000.0, InputMode::Voice, &model).unwrap();
    assert!(close(cost, 1.44));
}

#[test]
fn sixty_megabyte_upload_bills_an_hour_on_every_voice_model() {
    let catalog = Catalog::builtin();
    let mut session = Session::new(catalog.clone()).unwrap();
    session.set_mode(InputMode::Voice).unwrap();
    session.attach_voice_file(VoiceFile {
        name: "meeting.m4a".into(),
        size_bytes: 60 * 1024 * 1024,
        kind: MediaKind::Audio,
    });

    let expected = [
        ("whisper-1", 0.36),
        ("azure-speech", 0.06),
        ("google-speech", 1.44),
        ("aws-transcribe", 1.44),
        ("assemblyai", 1.332),
        ("deepgram", 0.258),
    ];
    for (id, cost) in expected {
        session.select_model(id).unwrap();
        let estimate = session.estimate().unwrap();
        assert_eq!(estimate.voice_minutes(), Some(60.0));
        assert!(close(estimate.cost_usd, cost), "{} cost {}", id, estimate.cost_usd);
    }
}

#[test]
fn mode_switch_keeps_model_in_matching_catalog() {
    let mut session = Session::new(Catalog::builtin()).unwrap();
    for mode in InputMode::ALL {
        session.set_mode(mode).unwrap();
        assert!(session.model().serves(mode));
        for model in session.available_models() {
            session.select_model(model.id()).unwrap();
            assert!(session.model().serves(mode));
            session.estimate().unwrap();
        }
    }
}

#[test]
fn custom_catalog_round_trips_through_json() {
    let json = serde_json::to_string(&Catalog::builtin()).unwrap();
    let parsed = Catalog::from_json(&json).unwrap();
    assert_eq!(parsed, Catalog::builtin());
}
