//! Lint rule detection through the full pipeline.

use hdlscope_conformance::{full_pipeline, full_pipeline_with_lint};
use hdlscope_diagnostics::Severity;

const LATCH: &str = "\
module mux (input sel, input a, output reg out);
    always @(*) begin
        if (sel) out = a;
    end
endmodule
";

const BLOCKING_ADDER: &str = "\
module add (input clk, input a, input b, input cin, output reg sum);
    always @(posedge clk) begin
        assign sum = a + b + cin;
    end
endmodule
";

#[test]
fn latch_reported_once_at_closing_end() {
    let result = full_pipeline(LATCH);
    let latches = result.by_rule("inferred_latch");
    assert_eq!(latches.len(), 1, "{:?}", latches);
    assert_eq!(latches[0].line, Some(4));
    assert_eq!(latches[0].severity, Severity::Warning);
}

#[test]
fn else_branch_silences_latch() {
    let src = "\
module mux (input sel, input a, input b, output reg out);
    always @(*) begin
        if (sel) out = a;
        else out = b;
    end
endmodule
";
    assert!(full_pipeline(src).by_rule("inferred_latch").is_empty());
}

#[test]
fn blocking_assign_in_posedge_block() {
    let result = full_pipeline(BLOCKING_ADDER);
    let hits = result.by_rule("blocking_in_sequential");
    assert_eq!(hits.len(), 1, "{:?}", hits);
    assert_eq!(hits[0].line, Some(3));
}

#[test]
fn deny_promotes_to_error() {
    let result = full_pipeline_with_lint(LATCH, &["inferred_latch"], &[]);
    let latches = result.by_rule("inferred_latch");
    assert_eq!(latches.len(), 1);
    assert_eq!(latches[0].severity, Severity::Error);
    assert!(result.count(Severity::Error) >= 1);
}

#[test]
fn allow_suppresses_rule() {
    let result = full_pipeline_with_lint(LATCH, &[], &["inferred_latch"]);
    assert!(result.by_rule("inferred_latch").is_empty());
}

#[test]
fn clean_register_has_no_style_findings() {
    let src = "\
module dff (input clk, input d, output reg q);
    always @(posedge clk) begin
        q <= d;
    end
endmodule
";
    let result = full_pipeline(src);
    for rule in [
        "inferred_latch",
        "blocking_in_sequential",
        "nonblocking_in_combinational",
        "combinational_loop",
    ] {
        assert!(result.by_rule(rule).is_empty(), "unexpected {rule}");
    }
}

#[test]
fn lone_negedge_block_fires_both_reset_rules() {
    let src = "\
module rst (input rst_n, input d, output reg q);
    always @(negedge rst_n) q <= d;
endmodule
";
    let result = full_pipeline(src);
    for rule in ["missing_synchronizer", "async_reset_sync_deassert"] {
        let hits = result.by_rule(rule);
        assert_eq!(hits.len(), 1, "{rule}: {hits:?}");
        assert_eq!(hits[0].line, Some(2));
    }
}

#[test]
fn negedge_reset_followed_by_synchronizer_is_quiet() {
    let src = "\
module rst (input clk, input rst_n, input d, output reg q);
    reg rst_sync1, rst_sync2;
    always @(posedge clk or negedge rst_n)
        if (!rst_n) q <= 1'b0;
        else q <= d;
    always @(posedge clk) begin
        rst_sync1 <= rst_n;
        rst_sync2 <= rst_sync1;
    end
endmodule
";
    let result = full_pipeline(src);
    assert!(result.by_rule("missing_synchronizer").is_empty());
    assert!(result.by_rule("async_reset_sync_deassert").is_empty());
}
