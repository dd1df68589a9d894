//! Literal phrase tables for the two historic log-text formats.
//!
//! These anchors reproduce the exact wording the executor writes. They are
//! matched as plain substrings; changing a single character breaks
//! compatibility with existing logs.

/// Anchor around a port operation: `<prefix><local port> <infix><peer>`.
#[derive(Debug, Clone, Copy)]
pub struct PortPhrase {
    pub prefix: &'static str,
    pub infix: &'static str,
}

/// Text wrapped around a value: `<prefix><value><suffix>`.
#[derive(Debug, Clone, Copy)]
pub struct Enclosed {
    pub prefix: &'static str,
    pub suffix: &'static str,
}

/// Every anchor phrase one log format uses.
#[derive(Debug)]
pub struct FormatPhrases {
    pub name: &'static str,
    pub send: &'static str,
    pub send_to: &'static str,
    pub receive: &'static str,
    pub receive_from: &'static str,
    pub enqueued: &'static str,
    pub enqueued_from: &'static str,
    /// Procedure-based and check operations on a port
    pub receive_operations: &'static [&'static str],
    pub operation_succeeded: &'static str,
    pub operation_from: &'static str,
    pub start_function: &'static str,
    pub start_function_on: &'static str,
    pub component_creation: &'static str,
    pub component_alias: &'static str,
    pub component_done: Enclosed,
    /// Self-reported by the terminating component, followed by its verdict
    pub component_termination: &'static str,
    pub port_mapping: PortPhrase,
    pub port_unmapping: PortPhrase,
    pub port_connection: PortPhrase,
    pub port_disconnection: PortPhrase,
    pub testcase_start: Enclosed,
    pub testcase_end: Enclosed,
    pub mtc_creation: &'static [&'static str],
    pub mtc_termination: &'static [&'static str],
    pub mtc_done: &'static [&'static str],
    pub setverdict: &'static str,
    /// Wording only this format produces, used to detect the format
    pub distinctive: &'static [&'static str],
}

/// Older executor wording: port operations are logged by the caller with
/// fully qualified `ref:port` operands.
pub static FORMAT1: FormatPhrases = FormatPhrases {
    name: "format1",
    send: "Sent on ",
    send_to: " to ",
    receive: "Receive operation on port ",
    receive_from: " succeeded, message from ",
    enqueued: "Message enqueued on ",
    enqueued_from: " from ",
    receive_operations: &[
        "Getcall operation on port ",
        "Getreply operation on port ",
        "Catch operation on port ",
        "Check operation on port ",
    ],
    operation_succeeded: " succeeded",
    operation_from: " from ",
    start_function: "Starting function ",
    start_function_on: " on component ",
    component_creation: "PTC was created. Component reference: ",
    component_alias: ", name: ",
    component_done: Enclosed {
        prefix: "Component ",
        suffix: " is done.",
    },
    component_termination: "Parallel test component finished. Verdict: ",
    port_mapping: PortPhrase {
        prefix: "Mapping port ",
        infix: " to ",
    },
    port_unmapping: PortPhrase {
        prefix: "Unmapping port ",
        infix: " from ",
    },
    port_connection: PortPhrase {
        prefix: "Connecting port ",
        infix: " to ",
    },
    port_disconnection: PortPhrase {
        prefix: "Disconnecting port ",
        infix: " from ",
    },
    testcase_start: Enclosed {
        prefix: "Test case ",
        suffix: " started.",
    },
    testcase_end: Enclosed {
        prefix: "Test case ",
        suffix: " finished. Verdict: ",
    },
    mtc_creation: &["Main test component started."],
    mtc_termination: &["Main test component finished."],
    mtc_done: &["Final verdict of the test case: "],
    setverdict: "setverdict(",
    distinctive: &[
        "Mapping port ",
        "Unmapping port ",
        "Connecting port ",
        "Disconnecting port ",
        "Parallel test component finished.",
        "Main test component started.",
        "Main test component finished.",
    ],
};

/// Current executor wording: port operations are reported by the port owner
/// once they completed, with the peer written as `ref:port`.
pub static FORMAT2: FormatPhrases = FormatPhrases {
    name: "format2",
    send: "Sent on ",
    send_to: " to ",
    receive: "Receive operation on port ",
    receive_from: " succeeded, message from ",
    enqueued: "Message enqueued on ",
    enqueued_from: " from ",
    receive_operations: &[
        "Getcall operation on port ",
        "Getreply operation on port ",
        "Catch operation on port ",
        "Check operation on port ",
        "Trigger operation on port ",
    ],
    operation_succeeded: " succeeded",
    operation_from: " from ",
    start_function: "Starting function ",
    start_function_on: " on component ",
    component_creation: "PTC was created. Component reference: ",
    component_alias: ", component name: ",
    component_done: Enclosed {
        prefix: "PTC with component reference ",
        suffix: " is done.",
    },
    component_termination: "Final verdict of PTC: ",
    port_mapping: PortPhrase {
        prefix: "Port ",
        infix: " was mapped to ",
    },
    port_unmapping: PortPhrase {
        prefix: "Port ",
        infix: " was unmapped from ",
    },
    port_connection: PortPhrase {
        prefix: "Port ",
        infix: " has established the connection with ",
    },
    port_disconnection: PortPhrase {
        prefix: "Port ",
        infix: " was disconnected from ",
    },
    testcase_start: Enclosed {
        prefix: "Test case ",
        suffix: " started.",
    },
    testcase_end: Enclosed {
        prefix: "Test case ",
        suffix: " finished. Verdict: ",
    },
    mtc_creation: &["TTCN-3 Main Test Component started on "],
    mtc_termination: &["TTCN-3 Main Test Component finished."],
    mtc_done: &["Setting final verdict of the test case."],
    setverdict: "setverdict(",
    distinctive: &[
        " was mapped to ",
        " was unmapped from ",
        " has established the connection with ",
        " was disconnected from ",
        "Final verdict of PTC: ",
        "TTCN-3 Main Test Component started on ",
        "TTCN-3 Main Test Component finished.",
        "PTC with component reference ",
        ", component name: ",
    ],
};

/// System start/stop literals of one execution mode.
#[derive(Debug)]
pub struct ModePhrases {
    pub name: &'static str,
    pub system_start: &'static str,
    pub system_stop: &'static str,
}

pub static PARALLEL: ModePhrases = ModePhrases {
    name: "parallel",
    system_start: "Host Controller started",
    system_stop: "Host Controller finished",
};

pub static SINGLE: ModePhrases = ModePhrases {
    name: "single",
    system_start: "TTCN-3 Test Executor started in single mode.",
    system_stop: "TTCN-3 Test Executor finished in single mode.",
};

/// Phrase marking a record as a cause of a later failing verdict.
pub const DYNAMIC_ERROR: &str = "dynamic test case error";
