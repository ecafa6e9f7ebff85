//! BDD step definitions for describe behaviour.

use basalt::test_support::field_value;
use rstest_bdd_macros::{given, then, when};

use super::test_helpers::{
    CLONE, DescribeContext, DescribeOutcome, SNAPSHOT, SOURCE, run_describe, seed_lifecycle,
};

#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error("assertion failed: {0}")]
    Assertion(String),
}

fn rendered_blocks(describe_context: &DescribeContext) -> Result<&[String], StepError> {
    match describe_context.outcome.as_ref() {
        Some(DescribeOutcome::Blocks(blocks)) => Ok(blocks),
        Some(DescribeOutcome::Failure(message)) => Err(StepError::Assertion(format!(
            "expected rendered descriptions, got failure: {message}"
        ))),
        None => Err(StepError::Assertion(String::from("missing outcome"))),
    }
}

fn block_for<'a>(blocks: &'a [String], name: &str) -> Result<&'a String, StepError> {
    blocks
        .iter()
        .find(|block| field_value(block, "Volume").as_deref() == Some(name))
        .ok_or_else(|| StepError::Assertion(format!("no description for {name}")))
}

#[given("a seeded registry with a volume, a clone, and a snapshot")]
fn seeded_registry(mut describe_context: DescribeContext) -> DescribeContext {
    describe_context.source_id = Some(seed_lifecycle(&describe_context.store));
    describe_context
}

#[given("the source volume has been deleted")]
fn source_deleted(describe_context: DescribeContext) -> DescribeContext {
    describe_context
        .store
        .delete(SOURCE)
        .unwrap_or_else(|err| panic!("source should delete: {err}"));
    describe_context
}

#[when("I describe every volume")]
fn describe_every_volume(mut describe_context: DescribeContext) -> DescribeContext {
    describe_context.outcome = Some(match run_describe(&describe_context.store, &[]) {
        Ok(blocks) => DescribeOutcome::Blocks(blocks),
        Err(err) => DescribeOutcome::Failure(err.to_string()),
    });
    describe_context
}

#[when("I describe the source volume and \"{name}\"")]
fn describe_source_and(mut describe_context: DescribeContext, name: String) -> DescribeContext {
    let names = vec![SOURCE.to_owned(), name];
    describe_context.outcome = Some(match run_describe(&describe_context.store, &names) {
        Ok(blocks) => DescribeOutcome::Blocks(blocks),
        Err(err) => DescribeOutcome::Failure(err.to_string()),
    });
    describe_context
}

#[then("{count:u32} descriptions are rendered")]
fn count_rendered(describe_context: &DescribeContext, count: u32) -> Result<(), StepError> {
    let blocks = rendered_blocks(describe_context)?;
    if blocks.len() == count as usize {
        Ok(())
    } else {
        Err(StepError::Assertion(format!(
            "expected {count} descriptions, got {}",
            blocks.len()
        )))
    }
}

#[then("the clone and snapshot descriptions name the source volume as parent")]
fn derivatives_name_parent(describe_context: &DescribeContext) -> Result<(), StepError> {
    let source_id = describe_context
        .source_id
        .as_ref()
        .ok_or_else(|| StepError::Assertion(String::from("registry was not seeded")))?;
    let blocks = rendered_blocks(describe_context)?;
    for name in [CLONE, SNAPSHOT] {
        let block = block_for(blocks, name)?;
        let parent = field_value(block, "Parent");
        if parent.as_deref() != Some(source_id.as_str()) {
            return Err(StepError::Assertion(format!(
                "{name} should report parent {source_id}, got {parent:?}"
            )));
        }
    }
    Ok(())
}

#[then("the source description has no parent line")]
fn source_has_no_parent(describe_context: &DescribeContext) -> Result<(), StepError> {
    let blocks = rendered_blocks(describe_context)?;
    let block = block_for(blocks, SOURCE)?;
    match field_value(block, "Parent") {
        None => Ok(()),
        Some(parent) => Err(StepError::Assertion(format!(
            "plain volume should have no parent line, got {parent}"
        ))),
    }
}

#[then("the describe request fails naming \"{name}\"")]
fn request_fails_naming(describe_context: &DescribeContext, name: String) -> Result<(), StepError> {
    match describe_context.outcome.as_ref() {
        Some(DescribeOutcome::Failure(message)) if message.contains(&name) => Ok(()),
        Some(DescribeOutcome::Failure(message)) => Err(StepError::Assertion(format!(
            "failure should name {name}: {message}"
        ))),
        Some(DescribeOutcome::Blocks(_)) => Err(StepError::Assertion(String::from(
            "describe should have failed",
        ))),
        None => Err(StepError::Assertion(String::from("missing outcome"))),
    }
}
