//! Element-level grammar tests driven through the public API

use cnf::cnf::grammar::{parse_tree, unescape};
use rstest::rstest;

#[rstest]
#[case("port = 3306", "port", "3306")]
#[case("port=3306", "port", "3306")]
#[case("datadir = /var/lib/mysql", "datadir", "/var/lib/mysql")]
#[case("socket = \"/tmp/mysql.sock\"", "socket", "/tmp/mysql.sock")]
#[case("password = 'p w'", "password", "p w")]
#[case("slow_query_log_file = slow.log", "slow_query_log_file", "slow.log")]
#[case("replicate-do-db = main,aux", "replicate-do-db", "main,aux")]
#[case("sql_mode = STRICT_TRANS_TABLES,NO_ENGINE_SUBSTITUTION", "sql_mode", "STRICT_TRANS_TABLES,NO_ENGINE_SUBSTITUTION")]
fn parses_section_key(#[case] line: &str, #[case] key: &str, #[case] value: &str) {
    let input = format!("[mysqld]\n{}\n", line);
    let tree = parse_tree(&input).expect("should parse");
    let section = tree.nodes[0].as_section().expect("section");
    let kv = section.children[0].as_key_value().expect("key");
    assert_eq!(kv.key.as_str(), key);
    assert_eq!(kv.value.as_str(), value);
}

#[rstest]
#[case("skip-networking")]
#[case("skip_external_locking")]
#[case("quick")]
fn parses_boolean_key(#[case] line: &str) {
    let input = format!("[mysqld]\n{}\n", line);
    let tree = parse_tree(&input).expect("should parse");
    let section = tree.nodes[0].as_section().expect("section");
    let kv = section.children[0].as_key_value().expect("key");
    assert_eq!(kv.key.as_str(), line);
    assert_eq!(kv.value.as_str(), "true");
    assert_eq!(kv.value.length, 0);
}

#[rstest]
#[case("; hello", "hello")]
#[case("# world", "world")]
#[case(";", "")]
#[case("   ; indented", "indented")]
fn parses_comment(#[case] line: &str, #[case] text: &str) {
    let input = format!("{}\n", line);
    let tree = parse_tree(&input).expect("should parse");
    let comment = tree.nodes[0].as_comment().expect("comment");
    assert_eq!(comment.text, text);
    assert_eq!(comment.line, 1);
}

#[rstest]
#[case("!include /etc/extra.cnf", "!include", "/etc/extra.cnf")]
#[case("!include \"extra.cnf\"", "!include", "extra.cnf")]
#[case("!includedir 'conf.d'", "!includedir", "conf.d")]
#[case("!includedir /etc/my.cnf.d", "!includedir", "/etc/my.cnf.d")]
fn parses_include_directive(#[case] line: &str, #[case] key: &str, #[case] path: &str) {
    let input = format!("{}\n", line);
    let tree = parse_tree(&input).expect("should parse");
    let kv = tree.nodes[0].as_key_value().expect("directive");
    assert!(kv.is_directive());
    assert_eq!(kv.key.as_str(), key);
    assert_eq!(kv.value.as_str(), path);
}

#[rstest]
#[case("[unclosed\n")]
#[case("[]\n")]
#[case("=nokey\n")]
#[case("[s]\n===\n")]
#[case("!include\n")]
fn rejects_malformed_input(#[case] input: &str) {
    let error = parse_tree(input).expect_err("should fail");
    assert!(error.position.line >= 1);
    assert!(!error.expected.is_empty());
}

#[test]
fn parses_a_realistic_file() {
    let input = "\
# The MySQL database server configuration file
[client]
port = 3306
socket = /var/run/mysqld/mysqld.sock

[mysqld]
user = mysql
port = 3306
basedir = /usr
datadir = /var/lib/mysql
skip-external-locking
; fine tuning
key_buffer_size = 16M
max_allowed_packet = 16M
";
    let tree = parse_tree(input).expect("should parse");

    assert_eq!(tree.nodes.len(), 3);
    assert_eq!(tree.sections().count(), 2);

    let mysqld = tree
        .sections()
        .find(|s| s.name.as_str() == "mysqld")
        .expect("mysqld section");
    assert_eq!(mysqld.keys().count(), 7);
    assert_eq!(mysqld.comments().count(), 1);
}

#[test]
fn unescape_normalizes_backslash_pairs() {
    assert_eq!(unescape(r"a\\b"), "ab");
    assert_eq!(unescape(r"a\qb"), r"a\qb");
}
