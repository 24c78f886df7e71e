use std::{fs, rc::Rc};

use squared::{
    interpreter::{
        host::Host,
        lexer::{Token, tokenize},
        value::core::Value,
    },
    run_script,
};
use walkdir::WalkDir;

fn run_lines(src: &str) -> Vec<String> {
    let (host, lines) = Host::collecting();
    if let Err(e) = run_script(src, host, false) {
        panic!("Script failed: {e}");
    }
    let collected = lines.borrow().clone();
    collected
}

fn assert_output(src: &str, expected: &[&str]) {
    let expected: Vec<String> = expected.iter().map(ToString::to_string).collect();
    assert_eq!(run_lines(src), expected, "for script:\n{src}");
}

fn assert_failure(src: &str) {
    let (host, _lines) = Host::collecting();
    if run_script(src, host, false).is_ok() {
        panic!("Script succeeded but was expected to fail:\n{src}")
    }
}

#[test]
fn assignment_and_print() {
    assert_output("var [x] = int[10]\nprint(x)\n", &["10"]);
}

#[test]
fn conditional_takes_the_truthy_branch() {
    assert_output("var [x] = int[3]\nif [x > int[1]]\n    print(str[big])\nelse\n    print(str[small])\n",
                  &["big"]);
    assert_output("var [x] = int[0]\nif [x > int[1]]\n    print(str[big])\nelse\n    print(str[small])\n",
                  &["small"]);
}

#[test]
fn while_loop_counts() {
    assert_output("var [i] = int[0]\nwhile [i < int[3]]\n    print(i)\n    i = i + int[1]\n",
                  &["0", "1", "2"]);
}

#[test]
fn break_leaves_the_loop() {
    let src = "var [i] = int[0]
while [bool[true]]
    i = i + int[1]
    if [i == int[3]]
        break
print(i)
";
    assert_output(src, &["3"]);
}

#[test]
fn function_closes_over_global() {
    let src = "var [g] = int[10]
func [add(var[a])]
    return a + g
print(add(int[5]))
";
    assert_output(src, &["15"]);
}

#[test]
fn array_and_template_interpolation() {
    let src = "var [xs] = a[int[1], int[2], int[3]]
print(fstr[sum is {xs.e0 + xs.e2}])
";
    assert_output(src, &["sum is 4"]);
}

#[test]
fn object_construction_and_member() {
    let src = "var [o] = obj[prop[name] = str[bot], prop[greet] = f[fstr[hi {str[there]}]]]
print(o.name)
";
    assert_output(src, &["bot"]);
}

#[test]
fn multiplication_binds_like_addition() {
    // The arithmetic ladder is flat and left-associative.
    assert_output("print(int[2] + int[3] * int[4])\n", &["20"]);
    assert_output("print(int[10] - int[2] - int[3])\n", &["5"]);
    assert_output("print(int[2] + (int[3] * int[4]))\n", &["14"]);
}

#[test]
fn constructor_idempotence() {
    assert_output("print(int[42])\nprint(fint[{42}])\n", &["42", "42"]);
    assert_output("print(str[hello])\nprint(fstr[hello])\n", &["hello", "hello"]);
}

#[test]
fn local_declaration_shadows_global() {
    let src = "var [x] = int[1]
func [shadow()]
    var [x] = int[99]
    return x
print(shadow())
print(x)
";
    assert_output(src, &["99", "1"]);
}

#[test]
fn assignment_writes_through_to_global() {
    // `counter` is declared after the function, so the closure snapshot
    // does not hold it and assignment reaches the live globals.
    let src = "func [bump()]
    counter = counter + int[1]
var [counter] = int[0]
bump()
bump()
print(counter)
";
    assert_output(src, &["2"]);
}

#[test]
fn closure_captures_a_snapshot() {
    // Mutating the global after the declaration is invisible inside the
    // function; the closure copied its bindings at declaration time.
    let src = "var [g] = int[1]
func [read()]
    return g
g = int[2]
print(read())
";
    assert_output(src, &["1"]);
}

#[test]
fn return_escapes_nested_loops() {
    let src = "func [find()]
    var [i] = int[0]
    while [i < int[10]]
        if [i == int[3]]
            return i
        i = i + int[1]
    return int[99]
print(find())
";
    assert_output(src, &["3"]);
}

#[test]
fn break_affects_only_the_nearest_loop() {
    let src = "var [total] = int[0]
var [i] = int[0]
while [i < int[3]]
    var [j] = int[0]
    while [j < int[10]]
        j = j + int[1]
        if [j == int[2]]
            break
    total = total + j
    i = i + int[1]
print(total)
";
    assert_output(src, &["6"]);
}

#[test]
fn continue_still_runs_the_for_update() {
    let src = "for [var [k] = int[0], k < int[5], k = k + int[1]]
    if [k == int[2]]
        continue
    print(k)
print(k)
";
    // The loop variable outlives the loop; init ran in the enclosing scope.
    assert_output(src, &["0", "1", "3", "4", "5"]);
}

#[test]
fn for_loop_sums_a_range() {
    let src = "var [total] = int[0]
for [var [n] = int[1], n <= int[4], n = n + int[1]]
    total = total + n
print(total)
";
    assert_output(src, &["10"]);
}

#[test]
fn indentation_markers_balance() {
    let src = "var [i] = int[0]
while [i < int[2]]
    if [i == int[0]]
        print(i)
    i = i + int[1]
print(i)
";
    let tokens = tokenize(src);
    let indents = tokens.iter()
                        .filter(|(t, _)| matches!(t, Token::Indent(_)))
                        .count();
    let dedents = tokens.iter().filter(|(t, _)| matches!(t, Token::Dedent)).count();
    assert_eq!(indents, dedents);
    assert!(indents > 0);
}

#[test]
fn unbound_names_carry_their_spelling() {
    assert_output("print(f[hello])\n", &["hello"]);
    assert_output("print(fstr[hello there])\n", &["hello there"]);
}

#[test]
fn string_normalization_rules() {
    assert_output("print(str[hi , there])\n", &["hi,there"]);
    assert_output("print(fstr[hi , there])\n", &["hi, there"]);
    assert_output("print(fstr[really ?])\n", &["really?"]);
}

#[test]
fn bool_constructor_compares_case_insensitively() {
    assert_output("print(bool[TRUE])\nprint(bool[nope])\n", &["true", "false"]);
}

#[test]
fn var_constructor_resolves_or_fails() {
    assert_output("var [x] = int[7]\nprint(var[x])\n", &["7"]);
    assert_failure("print(var[missing])\n");
}

#[test]
fn dynamic_member_access() {
    let src = "var [o] = obj[prop[a] = int[1], prop[b] = int[2]]
print(o.{str[b]})
";
    assert_output(src, &["2"]);
}

#[test]
fn object_skips_non_prop_segments() {
    let src = "var [o] = obj[int[1], prop[a] = int[2]]
print(o)
";
    assert_output(src, &["{ a: 2 }"]);
}

#[test]
fn array_members() {
    let src = "var [xs] = a[int[1], int[2]]
print(xs.val)
print(xs.e5)
print(xs.1)
";
    assert_output(src, &["[1, 2]", "undefined", "2"]);
}

#[test]
fn nested_arrays_keep_their_brackets() {
    let src = "var [xs] = a[a[int[1], int[2]], int[3]]
print(xs.e0.e1)
print(xs.e1)
";
    assert_output(src, &["2", "3"]);
}

#[test]
fn empty_constructor_bodies() {
    assert_output("print(a[])\nprint(obj[])\n", &["[]", "{}"]);
}

#[test]
fn object_method_call() {
    let src = "func [shout()]
    return str[hey]
var [o] = obj[prop[m] = shout]
print(o.m())
";
    assert_output(src, &["hey"]);
}

#[test]
fn eval_builtin_keeps_a_cell() {
    let src = "var [cell] = eval(int[7])
print(cell.result)
print(eval())
";
    assert_output(src, &["7", "7"]);
}

#[test]
fn random_stays_in_range() {
    let src = "var [roll] = random(int[1], int[6])
if [roll >= int[1]]
    if [roll <= int[6]]
        print(str[ok])
";
    assert_output(src, &["ok"]);
    assert_output("print(random(a[int[5]]))\n", &["5"]);
    assert_output("print(random(int[3], int[3]))\n", &["3"]);
}

#[test]
fn comments_and_blank_lines_are_ignored() {
    let src = "# a comment
var [x] = int[1]

    # an indented comment does not open a block
print(x)
";
    assert_output(src, &["1"]);
}

#[test]
fn tabs_indent_like_four_spaces() {
    assert_output("var [x] = int[1]\nif [x]\n\tprint(x)\n", &["1"]);
}

#[test]
fn pipe_mode_prints_the_final_expression() {
    let (host, lines) = Host::collecting();
    run_script("int[2] + int[3]\n", host, true).unwrap();
    assert_eq!(*lines.borrow(), vec!["5".to_string()]);
}

#[test]
fn import_binds_module_and_members() {
    let (mut host, lines) = Host::collecting();
    host.register_module("geometry.js",
                         Value::Object(Rc::new(vec![("sides".to_string(), Value::from(4)),
                                                    ("label".to_string(),
                                                     Value::from("square"))])));

    let src = "import geometry.js
print(geometry.sides)
print(sides)
print(label)
";
    run_script(src, host, false).unwrap();
    assert_eq!(*lines.borrow(),
               vec!["4".to_string(), "4".to_string(), "square".to_string()]);
}

#[test]
fn unknown_module_is_error() {
    assert_failure("import nope\n");
}

#[test]
fn assignment_to_unknown_variable_is_error() {
    assert_failure("x = int[1]\n");
}

#[test]
fn division_by_zero_is_error() {
    assert_failure("print(int[1] / int[0])\n");
}

#[test]
fn calling_a_non_function_is_error() {
    assert_failure("nope(int[1])\n");
}

#[test]
fn invalid_member_is_error() {
    assert_failure("print(int[1].x)\n");
    assert_failure("var [o] = obj[prop[a] = int[1]]\nprint(o.b)\n");
}

#[test]
fn first_syntax_error_is_fatal() {
    assert_failure("var [x] =\n");
    assert_failure(")\n");
    assert_failure("if [int[1]]\nprint(int[1])\n");
}

#[test]
fn example_script_works() {
    let script = fs::read_to_string("tests/example.sq").expect("missing file");
    assert_output(&script,
                  &["welcome to the bazaar",
                    "we are open",
                    "sword costs 30",
                    "shield costs 25",
                    "potion costs 10",
                    "total 65"]);
}

#[test]
fn demo_scripts_work() {
    let mut count = 0;

    for entry in WalkDir::new("demos").into_iter()
                                      .filter_map(Result::ok)
                                      .filter(|e| {
                                          e.path().extension().is_some_and(|ext| ext == "sq")
                                      })
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        let (host, lines) = Host::collecting();
        if let Err(e) = run_script(&content, host, false) {
            panic!("Demo script {path:?} failed:\n{content}\nError: {e}");
        }
        assert!(!lines.borrow().is_empty(), "Demo {path:?} printed nothing");
        count += 1;
    }

    assert!(count > 0, "No demo scripts found in demos/");
}
