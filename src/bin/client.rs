use std::path::PathBuf;
use std::str::FromStr;
use anyhow::anyhow;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use restaurant_pos::client::{ApiClient, AuthService, OrderService, ProductService, ReportService};
use restaurant_pos::client::service::DEFAULT_RECEIPTS_DIR;
use restaurant_pos::model::{Appetizer, Cashier, Drink, MainCourse, MenuItem, NewUser, Order, ProductKind, Role};

#[derive(Parser, Debug)]
#[command(name = "restaurant-pos")]
#[command(about = "client cli used by restaurant staffs to interact with the server", version, long_about = None)]
struct Cli {
    #[arg(long, global = true, default_value = "http://localhost:8080", help = "Server base url")]
    host: String,
    #[arg(long, global = true, default_value = DEFAULT_RECEIPTS_DIR, help = "Directory receipts are written to")]
    receipts: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// check staff credentials
    #[command(arg_required_else_help = true)]
    Login { username: String, password: String },
    /// print the full menu
    Menu,
    /// server, database and menu status
    Status,
    /// manage one product kind
    #[command(arg_required_else_help = true)]
    Product(ProductArgs),
    /// manage cashiers
    #[command(arg_required_else_help = true)]
    Cashier(CashierArgs),
    /// manage accounts
    #[command(arg_required_else_help = true)]
    User(UserArgs),
    /// total an order and write its receipt
    #[command(arg_required_else_help = true)]
    Bill {
        #[arg(long, help = "Receipt number", value_parser = clap::value_parser!(u32).range(1..))]
        receipt: u32,
        #[arg(long = "item", help = "Ordered product", value_name = "KIND:ID[:QTY]", num_args = 1.., required = true)]
        items: Vec<ItemSpec>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    Appetizer,
    Drink,
    MainCourse,
}

#[derive(Debug, Args)]
struct ProductArgs {
    #[arg(value_enum)]
    kind: KindArg,
    #[command(subcommand)]
    command: ProductCmds,
}

#[derive(Debug, Subcommand)]
enum ProductCmds {
    List,
    #[command(arg_required_else_help = true)]
    Get { id: i64 },
    #[command(arg_required_else_help = true)]
    Add { name: String, price: String },
    #[command(arg_required_else_help = true)]
    Update {
        #[arg(long)]
        id: Option<i64>,
        name: String,
        price: String,
    },
    #[command(arg_required_else_help = true)]
    Delete {
        #[arg(long)]
        id: Option<i64>,
    },
}

#[derive(Debug, Args)]
struct CashierArgs {
    #[command(subcommand)]
    command: CashierCmds,
}

#[derive(Debug, Subcommand)]
enum CashierCmds {
    List,
    #[command(arg_required_else_help = true)]
    Get { id: i64 },
    /// look up by exact name
    #[command(arg_required_else_help = true)]
    Find { name: String },
    #[command(arg_required_else_help = true)]
    Add {
        name: String,
        #[arg(long)]
        salary: Option<i32>,
    },
    #[command(arg_required_else_help = true)]
    Update {
        id: i64,
        name: String,
        #[arg(long)]
        salary: Option<i32>,
    },
    #[command(arg_required_else_help = true)]
    Delete { id: i64 },
}

#[derive(Debug, Args)]
struct UserArgs {
    #[command(subcommand)]
    command: UserCmds,
}

#[derive(Debug, Subcommand)]
enum UserCmds {
    List,
    #[command(arg_required_else_help = true)]
    Add {
        username: String,
        password: String,
        #[arg(long, default_value = "cashier")]
        role: Role,
    },
    #[command(arg_required_else_help = true)]
    Delete { id: i64 },
}

/// `KIND:ID[:QTY]`, quantity defaults to 1
#[derive(Debug, Clone, PartialEq)]
struct ItemSpec {
    kind: ProductKind,
    id: i64,
    quantity: u32,
}

impl FromStr for ItemSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');
        let kind = parts.next().unwrap_or_default().parse::<ProductKind>()?;
        let id = parts
            .next()
            .and_then(|id| id.parse::<i64>().ok())
            .ok_or_else(|| format!("Invalid product id in {s}"))?;
        let quantity = match parts.next() {
            None => 1,
            Some(qty) => qty.parse::<u32>().ok().filter(|q| *q > 0).ok_or_else(|| format!("Invalid quantity in {s}"))?,
        };
        if parts.next().is_some() {
            return Err(format!("Invalid item: {s}"));
        }
        Ok(Self { kind, id, quantity })
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("warn"));
    let args = Cli::parse();
    let api = ApiClient::new(&args.host)?;

    match args.command {
        Commands::Login { username, password } => {
            let user = AuthService::new(api).authenticate(&username, &password).await?;
            println!("welcome {}, logged in as {}", user.username, user.role);
        }
        Commands::Menu => print_json(&api.get_menu().await?)?,
        Commands::Status => {
            let health = api.health().await?;
            println!("server is {} at {}", health.status, health.timestamp);
            let db = api.db_check().await?;
            match db.error {
                None => println!("database is {}", db.status),
                Some(err) => println!("database is {}, {}", db.status, err),
            }
            println!("{}", ReportService::new(api).check_menu_status().await?);
        }
        Commands::Product(product) => match product.kind {
            KindArg::Appetizer => run_product::<Appetizer>(api, product.command).await?,
            KindArg::Drink => run_product::<Drink>(api, product.command).await?,
            KindArg::MainCourse => run_product::<MainCourse>(api, product.command).await?,
        },
        Commands::Cashier(cashier) => match cashier.command {
            CashierCmds::List => print_json(&ReportService::new(api).cashier_info().await?)?,
            CashierCmds::Get { id } => match api.get_cashier_by_id(id).await? {
                Some(found) => print_json(&found)?,
                None => println!("cashier {} not found", id),
            },
            CashierCmds::Find { name } => match api.get_cashier_by_name(&name).await? {
                Some(found) => print_json(&found)?,
                None => println!("no cashier named {}", name),
            },
            CashierCmds::Add { name, salary } => {
                let saved = api.create_cashier(&Cashier::new(name, salary)).await?;
                println!("cashier created with id = {:?}", saved.id);
            }
            CashierCmds::Update { id, name, salary } => {
                let saved = api.update_cashier(id, &Cashier::new(name, salary)).await?;
                print_json(&saved)?;
            }
            CashierCmds::Delete { id } => {
                api.delete_cashier(id).await?;
                println!("cashier {} deleted", id);
            }
        },
        Commands::User(user) => match user.command {
            UserCmds::List => print_json(&api.get_all_users().await?)?,
            UserCmds::Add { username, password, role } => {
                let saved = api.create_user(&NewUser { username, password, role }).await?;
                println!("user {} created with id = {:?}", saved.username, saved.id);
            }
            UserCmds::Delete { id } => {
                api.delete_user(id).await?;
                println!("user {} deleted", id);
            }
        },
        Commands::Bill { receipt, items } => {
            let mut order = Order::new();
            for item in &items {
                match item.kind {
                    ProductKind::Appetizer => add_line::<Appetizer>(&api, &mut order, item).await?,
                    ProductKind::Drink => add_line::<Drink>(&api, &mut order, item).await?,
                    ProductKind::MainCourse => add_line::<MainCourse>(&api, &mut order, item).await?,
                }
            }
            let orders = OrderService::new(args.receipts);
            let bill = orders.bill_for(&order);
            let path = orders.generate_receipt_file(receipt, &bill)?;
            println!("subtotal {:?} SR, vat {:?} SR, total {:?} SR", bill.sub_total, bill.vat, bill.total);
            println!("receipt written to {}", path.display());
        }
    };
    Ok(())
}

async fn run_product<P: MenuItem>(api: ApiClient, command: ProductCmds) -> Result<(), anyhow::Error> {
    let service = ProductService::<P>::new(api);
    match command {
        ProductCmds::List => print_json(&service.get_all().await?)?,
        ProductCmds::Get { id } => match service.get_by_id(id).await? {
            Some(item) => print_json(&item)?,
            None => println!("{} {} not found", P::KIND, id),
        },
        ProductCmds::Add { name, price } => {
            let saved = service.add(&name, &price).await?;
            println!("{} created with id = {:?}", P::KIND, saved.id());
        }
        ProductCmds::Update { id, name, price } => print_json(&service.update(id, &name, &price).await?)?,
        ProductCmds::Delete { id } => {
            service.delete(id).await?;
            println!("{} deleted", P::KIND);
        }
    }
    Ok(())
}

async fn add_line<P: MenuItem>(api: &ApiClient, order: &mut Order, item: &ItemSpec) -> Result<(), anyhow::Error> {
    let product = api
        .get_by_id::<P>(item.id)
        .await?
        .ok_or_else(|| anyhow!("{} {} not found", P::KIND, item.id))?;
    if !product.fields().available {
        return Err(anyhow!("{} {} is not available", P::KIND, product.name()));
    }
    order.add(&product, item.quantity);
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), anyhow::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_specs() {
        assert_eq!(
            "drink:3".parse::<ItemSpec>().unwrap(),
            ItemSpec { kind: ProductKind::Drink, id: 3, quantity: 1 }
        );
        assert_eq!(
            "main-course:12:2".parse::<ItemSpec>().unwrap(),
            ItemSpec { kind: ProductKind::MainCourse, id: 12, quantity: 2 }
        );
        assert!("dessert:1".parse::<ItemSpec>().is_err());
        assert!("drink".parse::<ItemSpec>().is_err());
        assert!("drink:1:0".parse::<ItemSpec>().is_err());
        assert!("drink:1:2:3".parse::<ItemSpec>().is_err());
    }

    #[test]
    fn cli_shape() {
        use clap::CommandFactory;
        Cli::command().debug_assert();

        let cli = Cli::parse_from(["client", "--host", "http://pos:9000", "bill", "--receipt", "7", "--item", "drink:1", "appetizer:2:3"]);
        assert_eq!(cli.host, "http://pos:9000");
        match cli.command {
            Commands::Bill { receipt, items } => {
                assert_eq!(receipt, 7);
                assert_eq!(items.len(), 2);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
