mod common;

use common::Harness;
use ruleforge::kernel::schema::Role;
use ruleforge::kernel::state::DialogMode;
use ruleforge::DialogError;

const MAKERULE: &str = r#"{"special":"makerule"}"#;
const BACK: &str = r#"{"special":"tt:root.special.back"}"#;

fn choice(index: usize) -> String {
    format!(r#"{{"answer":{{"type":"Choice","value":{}}}}}"#, index)
}

const INTRO_MENU: &str = ">> Click on one of the following buttons to start adding command.
>> ask special generic
>> choice 0: When
>> choice 1: Get
>> choice 2: Do
";

#[tokio::test]
async fn test_back_from_categories_returns_to_menu() {
    let mut harness = Harness::new();
    harness.json(MAKERULE).await;
    harness.json(&choice(0)).await;
    assert_eq!(harness.reactor.state().mode, DialogMode::AwaitingCommand { role: Role::Trigger });

    let output = harness.json(BACK).await;
    assert_eq!(output, INTRO_MENU);
    assert_eq!(harness.reactor.state().mode, DialogMode::AwaitingStageChoice);
}

#[tokio::test]
async fn test_do_it_now_clears_trigger() {
    let mut harness = Harness::new();
    harness.json(MAKERULE).await;
    harness.json(&choice(0)).await;
    harness
        .json(r#"{"trigger":{"args":[],"name":{"id":"tt:security-camera.new_event"}}}"#)
        .await;
    assert!(harness.reactor.program().trigger.is_some());

    harness.json(&choice(0)).await;
    let output = harness.json(r#"{"special":"tt:root.special.empty"}"#).await;

    assert_eq!(output, INTRO_MENU, "an emptied program shows the intro menu again");
    assert!(harness.reactor.program().trigger.is_none());
    assert!(harness.reactor.state().building);
}

#[tokio::test]
async fn test_category_lists_functions_of_role() {
    let mut harness = Harness::new();
    harness.json(MAKERULE).await;
    harness.json(&choice(2)).await;

    let output = harness
        .json(r#"{"command":{"type":"help","value":{"id":"tt:type.social-network"}}}"#)
        .await;
    assert_eq!(
        output,
        r#">> ask special command
>> Pick a command below.
>> button: post picture on twitter {"action":{"name":{"id":"tt:twitter.post_picture"},"args":[]}}
>> button: tweet on twitter {"action":{"name":{"id":"tt:twitter.sink"},"args":[]}}
>> button: post on facebook {"action":{"name":{"id":"tt:facebook.post"},"args":[]}}
>> button: Back {"special":"tt:root.special.back"}
"#
    );
}

#[tokio::test]
async fn test_get_replaces_previous_query() {
    let mut harness = Harness::new();
    harness.json(MAKERULE).await;
    harness.json(&choice(1)).await;
    harness.json(r#"{"query":{"args":[],"name":{"id":"tt:xkcd.get_comic"}}}"#).await;
    harness.json(&choice(1)).await;
    harness.json(r#"{"query":{"args":[],"name":{"id":"tt:xkcd.get_comic"}}}"#).await;

    assert_eq!(harness.reactor.program().queries.len(), 1);
}

#[tokio::test]
async fn test_run_it_with_filter_compiles() {
    let mut harness = Harness::new();
    harness.json(MAKERULE).await;
    harness.json(&choice(1)).await;
    harness.json(r#"{"query":{"args":[],"name":{"id":"tt:xkcd.get_comic"}}}"#).await;
    harness.json(&choice(2)).await;
    harness.json(r#"{"action":{"args":[],"name":{"id":"tt:twitter.sink"}}}"#).await;

    let output = harness.json(&choice(3)).await;
    assert_eq!(
        output,
        ">> Pick the command you want to add filters to:
>> ask special generic
>> choice 0: Get: comic on xkcd
>> choice 1: Back
"
    );
    harness.json(&choice(0)).await;

    // A filter button that carries its value skips the value question.
    let output = harness
        .json(r#"{"filter":{"type":"Number","operator":">","name":"number","value":{"value":100}}}"#)
        .await;
    assert_eq!(
        output,
        ">> Add more commands and filters or run your command if you are ready.
>> ask special generic
>> choice 0: When
>> choice 1: Get: comic on xkcd, number > 100
>> choice 2: Do: tweet on twitter
>> choice 3: Add a filter
>> choice 4: Run it
"
    );
    assert!(harness.reactor.program().action.as_ref().unwrap().device.is_none(), "devices wait for Run it");

    let output = harness.json(&choice(4)).await;
    assert_eq!(
        output,
        ">> You have multiple devices of type twitter. Which one do you want to use?
>> ask special generic
>> choice 0: Twitter Account foo
>> choice 1: Twitter Account bar
"
    );
    harness.json(&choice(1)).await;

    let output = harness.json(&choice(0)).await;
    assert_eq!(
        output,
        ">> Ok, so you want me to get an Xkcd comic if number is greater than 100 then tweet title. Is that right?
>> ask special yesno
"
    );

    let output = harness.json(r#"{"special":"yes"}"#).await;
    assert_eq!(output, ">> Consider it done.\n>> ask special null\n");
    assert_eq!(
        harness.apps(),
        vec![r#"AlmondGenerated() {
    now => @(type="xkcd",id="xkcd-6").get_comic() , number > 100 , v_number := number, v_title := title, v_picture_url := picture_url, v_link := link => @(type="twitter",id="twitter-bar").sink(status=v_title) ;
}"#
        .to_string()]
    );
    assert!(harness.reactor.is_idle());
    assert!(!harness.reactor.state().building);
}

#[tokio::test]
async fn test_back_from_filter_spec_returns_to_targets() {
    let mut harness = Harness::new();
    harness.json(MAKERULE).await;
    harness.json(&choice(1)).await;
    harness.json(r#"{"query":{"args":[],"name":{"id":"tt:xkcd.get_comic"}}}"#).await;
    harness.json(&choice(3)).await;
    harness.json(&choice(0)).await;

    let output = harness.json(BACK).await;
    assert!(output.starts_with(">> Pick the command you want to add filters to:\n"));
    assert!(matches!(harness.reactor.state().mode, DialogMode::AwaitingFilterTarget { .. }));

    // "Back" on the target list goes to the menu.
    let output = harness.json(&choice(1)).await;
    assert!(output.starts_with(">> Add more commands and filters"));
}

#[tokio::test]
async fn test_filter_not_offered_is_rejected() {
    let mut harness = Harness::new();
    harness.json(MAKERULE).await;
    harness.json(&choice(1)).await;
    harness.json(r#"{"query":{"args":[],"name":{"id":"tt:xkcd.get_comic"}}}"#).await;
    harness.json(&choice(3)).await;
    harness.json(&choice(0)).await;
    let version = harness.reactor.state().version;

    let result = harness
        .try_json(r#"{"filter":{"type":"URL","operator":"contains","name":"link","value":null}}"#)
        .await;
    assert!(matches!(result, Err(DialogError::MalformedIntent(_))));
    assert_eq!(harness.reactor.state().version, version, "a rejected filter leaves no trace");
}

#[tokio::test]
async fn test_menu_choice_out_of_range_is_rejected() {
    let mut harness = Harness::new();
    harness.json(MAKERULE).await;
    let version = harness.reactor.state().version;

    let result = harness.try_json(&choice(3)).await;
    assert!(matches!(result, Err(DialogError::MalformedIntent(_))));
    assert_eq!(harness.reactor.state().mode, DialogMode::AwaitingStageChoice);
    assert_eq!(harness.reactor.state().version, version);
}

#[tokio::test]
async fn test_do_it_now_unbinds_outputs_of_removed_trigger() {
    let mut harness = Harness::new();
    harness.json(MAKERULE).await;
    harness.json(&choice(0)).await;
    harness
        .json(r#"{"trigger":{"args":[],"name":{"id":"tt:security-camera.new_event"}}}"#)
        .await;
    harness.json(&choice(2)).await;
    harness
        .json(r#"{"action":{"args":[],"name":{"id":"tt:twitter.post_picture"}}}"#)
        .await;

    // Run it, pick both devices, bind the caption to the camera picture.
    harness.json(&choice(4)).await;
    harness.json(&choice(0)).await;
    let output = harness.json(&choice(0)).await;
    assert!(output.contains("choice 0: Use the picture url from security-camera"), "got {}", output);
    harness.json(&choice(0)).await;
    assert!(harness.reactor.program().action.as_ref().unwrap().arg("caption").is_some());

    // Back to the menu through a new trigger, then drop the trigger.
    harness
        .json(r#"{"trigger":{"args":[],"name":{"id":"tt:security-camera.new_event"}}}"#)
        .await;
    harness.json(&choice(0)).await;
    harness.json(r#"{"special":"tt:root.special.empty"}"#).await;
    assert!(
        harness.reactor.program().action.as_ref().unwrap().arg("caption").is_none(),
        "a binding to a removed stage is dropped"
    );

    // The caption is asked again, as free text this time.
    let output = harness.json(&choice(4)).await;
    assert_eq!(output, ">> What do you want to tweet?\n>> ask special generic\n");
    harness.json(r#"{"answer":{"type":"String","value":{"value":"look"}}}"#).await;
    let output = harness
        .json(r#"{"answer":{"type":"String","value":{"value":"http://x/p.png"}}}"#)
        .await;
    assert!(output.ends_with(">> ask special yesno\n"), "got {}", output);
    harness.json(r#"{"special":"yes"}"#).await;

    assert_eq!(
        harness.apps(),
        vec![r#"AlmondGenerated() {
    now => @(type="twitter",id="twitter-foo").post_picture(caption="look", picture_url="http://x/p.png") ;
}"#
        .to_string()]
    );
}

#[tokio::test]
async fn test_builder_rejects_reference_without_source() {
    let mut harness = Harness::new();
    harness.json(MAKERULE).await;
    harness.json(&choice(2)).await;
    let version = harness.reactor.state().version;

    let result = harness
        .try_json(r#"{"action":{"name":{"id":"tt:facebook.post"},"args":[{"name":{"id":"tt:param.status"},"operator":"is","type":"VarRef","value":{"id":"tt:param.text"}}]}}"#)
        .await;
    assert!(matches!(result, Err(DialogError::MalformedIntent(_))));
    assert!(harness.reactor.program().is_empty());
    assert_eq!(harness.reactor.state().version, version);
}
