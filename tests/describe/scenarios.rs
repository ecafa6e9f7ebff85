//! BDD scenarios for the describe workflow.

use rstest_bdd_macros::scenario;

use super::test_helpers::{DescribeContext, describe_context};

#[scenario(
    path = "tests/features/describe.feature",
    name = "Descriptions carry lineage for clones and snapshots"
)]
fn scenario_lineage_in_descriptions(describe_context: DescribeContext) {
    let _ = describe_context;
}

#[scenario(
    path = "tests/features/describe.feature",
    name = "Batch describe is all-or-nothing"
)]
fn scenario_batch_atomicity(describe_context: DescribeContext) {
    let _ = describe_context;
}

#[scenario(
    path = "tests/features/describe.feature",
    name = "Deleting the source keeps derivatives describable"
)]
fn scenario_weak_parent_reference(describe_context: DescribeContext) {
    let _ = describe_context;
}
