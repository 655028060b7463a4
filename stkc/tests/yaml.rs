use stkc::{compile_tree, Ast, Error, Options, SymbolMap};

// define main() { x = 3; out x; }
// g[2] = 7;
const PROGRAM: &str = "
keyword: stmt
left:
  keyword: stmt
  right:
    keyword: define
    left:
      keyword: func
      left: { ident: main }
    right:
      keyword: stmt
      left:
        keyword: stmt
        right:
          keyword: assign
          left: { ident: x }
          right: 3
      right:
        keyword: out
        right: { ident: x }
right:
  keyword: assign
  left:
    ident: g
    index: 2
  right: 7
";

fn load(text: &str) -> Ast {
    let ast = Ast::from_yaml(text).unwrap();
    if let Some(root) = ast.root() {
        println!("{}", ast.render(root));
    }
    ast
}

#[test]
fn compile_yaml_program() {
    let ast = load(PROGRAM);
    let program = compile_tree(&ast).unwrap();
    let text = program.render(&Options::default());
    println!("{}", text);

    let expected = "\
push 7
push 0
pop hx
pop [cx + 0 + hx]
push cx
push 2
add
pop bx
call main
hlt

main:
    push 3
    push 0
    pop hx
    pop [bx + 0 + hx]
    push 0
    pop hx
    push [bx + 0 + hx]
    out
";
    assert_eq!(text, expected);
}

#[test]
fn symbol_map() {
    let ast = load(PROGRAM);
    let program = compile_tree(&ast).unwrap();
    let map = SymbolMap::generate(&program);

    assert_eq!(map.globals["g"].shift, 0);
    assert_eq!(map.globals["g"].size, 2);
    let main = &map.functions["main"];
    assert_eq!(main.arity, 0);
    assert_eq!(main.frame, 1);
    assert_eq!(main.locals["x"].size, 1);

    let yaml = map.to_yaml().unwrap();
    println!("{}", yaml);
    let expected = "\
functions:
  main:
    arity: 0
    frame: 1
    locals:
      x:
        shift: 0
        size: 1
globals:
  g:
    shift: 0
    size: 2
";
    assert_eq!(yaml, expected);

    let parsed: SymbolMap = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(parsed, map);
}

#[test]
fn empty_document() {
    let ast = load("~");
    assert!(ast.is_empty());
    assert!(matches!(compile_tree(&ast), Err(Error::EmptyProgram)));
}

#[test]
fn malformed_document() {
    let err = Ast::from_yaml("keyword: [1, 2]").unwrap_err();
    println!("{}", err);
    assert!(matches!(err, Error::Yaml(_)));
}
