//! Example listing the variables a configuration reads, without loading it

use envtag::annotation::AnnotationSpec;
use envtag::{FieldDescriptor, Lookup};

#[derive(Debug, Default, Lookup)]
struct DatabaseConfig {
    #[env("DB_URL,required")]
    pub url: String,

    #[env("DB_POOL_SIZE")]
    pub pool_size: u32,
}

#[derive(Debug, Default, Lookup)]
struct Config {
    pub database: DatabaseConfig,

    #[env("LOG_LEVEL,expectedValues=error warn info debug trace")]
    pub log_level: String,

    #[env("-")]
    pub computed: String,
}

fn print_fields(fields: &[FieldDescriptor], depth: usize) {
    for field in fields {
        let indent = "  ".repeat(depth);
        if field.is_composite() {
            println!("{indent}{}:", field.name);
            print_fields(&field.children, depth + 1);
        } else {
            match AnnotationSpec::parse(field.annotation) {
                Ok(Some(spec)) => {
                    let validators: Vec<_> = spec.validators.iter().map(|v| v.name.as_str()).collect();
                    println!(
                        "{indent}{} ({}) <- {} [{}]",
                        field.name,
                        field.kind,
                        spec.env_name,
                        validators.join(", ")
                    );
                }
                Ok(None) => println!("{indent}{} ({}) not bound", field.name, field.kind),
                Err(e) => println!("{indent}{} ({}) {e}", field.name, field.kind),
            }
        }
    }
}

fn main() {
    print_fields(&Config::describe(), 0);
}
