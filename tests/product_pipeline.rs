//! End-to-end scenario: a product parsing pipeline wired by the container
//!
//! The domain pieces here are collaborators of the container, not part of
//! it: a flat product record, a delimited-line parser and the services that
//! consume them.

use std::sync::Arc;

use thiserror::Error;
use wirebox::injectable;
use wirebox::prelude::*;

const DELIMITER: char = ',';

#[derive(Debug, Clone, PartialEq)]
struct Product {
    id: u32,
    name: String,
    category: String,
    description: String,
    price: f64,
}

#[derive(Error, Debug)]
enum ParseError {
    #[error("expected 5 fields, got {0}")]
    FieldCount(usize),
    #[error("invalid numeric field {field}: {value}")]
    Numeric { field: &'static str, value: String },
}

fn parse_line(text: &str, delimiter: char) -> Result<Product, ParseError> {
    let fields: Vec<&str> = text.split(delimiter).collect();
    if fields.len() != 5 {
        return Err(ParseError::FieldCount(fields.len()));
    }
    let id = fields[0].parse().map_err(|_| ParseError::Numeric {
        field: "id",
        value: fields[0].to_string(),
    })?;
    let price = fields[4].parse().map_err(|_| ParseError::Numeric {
        field: "price",
        value: fields[4].to_string(),
    })?;
    Ok(Product {
        id,
        name: fields[1].to_string(),
        category: fields[2].to_string(),
        description: fields[3].to_string(),
        price,
    })
}

// Capabilities

trait FileReaderService: Send + Sync {
    fn read_lines(&self, source: &str) -> Vec<String>;
}

trait ProductParser: Send + Sync {
    fn parse(&self, line: &str) -> Result<Product, ParseError>;
}

trait ProductService: Send + Sync {
    fn load(&self, source: &str) -> Result<Vec<Product>, ParseError>;
}

// Implementations

#[derive(Default)]
struct FileReaderServiceImpl;

impl FileReaderService for FileReaderServiceImpl {
    fn read_lines(&self, source: &str) -> Vec<String> {
        source
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect()
    }
}

injectable!(FileReaderServiceImpl);

#[derive(Default)]
struct ProductParserImpl;

impl ProductParser for ProductParserImpl {
    fn parse(&self, line: &str) -> Result<Product, ParseError> {
        parse_line(line, DELIMITER)
    }
}

injectable!(ProductParserImpl);

#[derive(Default)]
struct ProductServiceImpl {
    reader: Option<Arc<dyn FileReaderService>>,
    parser: Option<Arc<dyn ProductParser>>,
}

impl ProductService for ProductServiceImpl {
    fn load(&self, source: &str) -> Result<Vec<Product>, ParseError> {
        let reader = self.reader.as_ref().expect("reader slot must be filled");
        let parser = self.parser.as_ref().expect("parser slot must be filled");
        reader
            .read_lines(source)
            .iter()
            .map(|line| parser.parse(line))
            .collect()
    }
}

injectable! {
    ProductServiceImpl {
        reader: Arc<dyn FileReaderService> => "FileReaderService",
        parser: Arc<dyn ProductParser> => "ProductParser",
    }
}

fn wired_container() -> Container {
    let mut builder = ContainerBuilder::new();
    builder
        .register::<FileReaderServiceImpl>()
        .register::<ProductParserImpl>()
        .register::<ProductServiceImpl>()
        .bind("FileReaderService", |c: Arc<FileReaderServiceImpl>| {
            c as Arc<dyn FileReaderService>
        })
        .bind("ProductParser", |c: Arc<ProductParserImpl>| {
            c as Arc<dyn ProductParser>
        })
        .bind("ProductService", |c: Arc<ProductServiceImpl>| {
            c as Arc<dyn ProductService>
        });
    builder.build()
}

#[test]
fn parses_the_literal_line() {
    let container = wired_container();

    let parser: Arc<dyn ProductParser> = container.resolve("ProductParser").unwrap();
    let product = parser.parse("1,Apple,Food,Red apple,15.75").unwrap();

    assert_eq!(
        product,
        Product {
            id: 1,
            name: "Apple".to_string(),
            category: "Food".to_string(),
            description: "Red apple".to_string(),
            price: 15.75,
        }
    );
}

#[test]
fn loads_products_through_the_wired_service() {
    let container = wired_container();

    let service: Arc<dyn ProductService> = container.resolve("ProductService").unwrap();
    let products = service
        .load("1,Apple,Food,Red apple,15.75\n2,Hammer,Tools,Claw hammer,9.99\n")
        .unwrap();

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].name, "Apple");
    assert_eq!(products[1].price, 9.99);
}

#[test]
fn parse_fails_on_field_count() {
    assert!(matches!(
        parse_line("1,Apple,Food", ','),
        Err(ParseError::FieldCount(3))
    ));
}

#[test]
fn parse_fails_on_numeric_conversion() {
    assert!(matches!(
        parse_line("one,Apple,Food,Red apple,15.75", ','),
        Err(ParseError::Numeric { field: "id", .. })
    ));
    assert!(matches!(
        parse_line("1,Apple,Food,Red apple,cheap", ','),
        Err(ParseError::Numeric { field: "price", .. })
    ));
}

mod unbound_reader {
    use super::*;

    // A parser variant that does need the reader capability; with no binding
    // for it, resolving the parser surfaces the missing dependency by name.

    #[derive(Default)]
    struct CsvParser {
        reader: Option<Arc<dyn FileReaderService>>,
    }

    injectable! {
        CsvParser {
            reader: Arc<dyn FileReaderService> => "Reader",
        }
    }

    #[test]
    fn unbound_dependency_is_named_at_top_level() {
        let mut builder = ContainerBuilder::new();
        builder.register::<CsvParser>();
        builder.bind_name("Parser", "CsvParser");
        let container = builder.build();

        match container.resolve::<Arc<CsvParser>>("Parser") {
            Err(ContainerError::UnboundCapability { capability }) => {
                assert_eq!(capability, "Reader");
            }
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }
}
