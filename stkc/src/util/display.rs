use crate::ast::Ast;
use crate::compile::Item;
use crate::driver::Program;
use crate::symbols::ScopeTable;
use color_print::cprintln;

/// Print tables and the instruction listing in color.
pub fn print_program(program: &Program, ast: &Ast) {
    println!("+-[Globals]-+------------------------------------------------------------");
    print_scope(&program.globals);

    println!("+-[Funcs]---+------------------------------------------------------------");
    for func in program.funcs.iter() {
        let local = program.frames.get(&func.name);
        cprintln!(
            "+-----------+ <green>{}</green> frame {}",
            func.signature(ast),
            local.map_or(0, ScopeTable::shift)
        );
        if let Some(local) = local {
            print_scope(local);
        }
    }

    println!("+-[Code]----+------------------------------------------------------------");
    let mut pc = 0usize;
    for line in program.code.lines() {
        match &line.item {
            Item::Inst(inst) => {
                cprintln!("| {:>9} : {}{}", pc, "  ".repeat(line.depth), inst.cformat());
                pc += 1;
            }
            Item::Label(label) => cprintln!("| <m>{}</m>:", label),
            Item::Comment(comment) => cprintln!("| <dim>; {}</dim>", comment),
        }
    }
}

fn print_scope(scope: &ScopeTable) {
    for var in scope.vars() {
        match var.len {
            Some(len) => cprintln!(
                "| {:>9} : <b>{}</b>[{}] @ {} + {}",
                "",
                var.name,
                len,
                scope.base(),
                var.shift
            ),
            None => cprintln!(
                "| {:>9} : <b>{}</b> @ {} + {}",
                "",
                var.name,
                scope.base(),
                var.shift
            ),
        }
    }
}
