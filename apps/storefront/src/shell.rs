//! # Interactive Shell
//!
//! Line-oriented front end over the command layer. Reads one command per
//! line, dispatches it against the session, and renders the response.
//!
//! ## Commands
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  list [page]        show a page of the product list                    │
//! │  search <term>      search by product name or offer type               │
//! │  search             clear the search                                   │
//! │  filter <kind>      all | flat | percentage | free | no-offers         │
//! │  show <product-id>  show one product card                              │
//! │  add <product-id>   add a product to the cart                          │
//! │  inc <product-id>   one more in the cart (one more pair for BOGO)      │
//! │  dec <product-id>   one less in the cart                               │
//! │  rm <product-id>    remove the product's cart line                     │
//! │  cart               show the cart                                      │
//! │  clear              empty the cart                                     │
//! │  help               show this list                                     │
//! │  quit               leave                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart lines are named by product id, so repeating a command never reaches
//! a different line. A product with no line in the cart leaves it unchanged.
//!
//! Command errors are printed and the loop continues; only I/O failures on
//! the streams end the session early.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use tracing::{debug, info};

use storefront_core::{Catalog, LineItemId, NotificationKind};

use crate::commands::cart::{self as cart_cmd, CartCommandResult, CartResponse};
use crate::commands::config::get_config;
use crate::commands::product::{self as product_cmd, ProductCard, ProductPageResponse};
use crate::error::ApiError;
use crate::state::{CartState, CatalogState, ConfigState, StorefrontConfig};

const HELP: &str = "\
Commands:
  list [page]        show a page of the product list
  search <term>      search by product name or offer type (no term clears it)
  filter <kind>      all | flat | percentage | free | no-offers
  show <product-id>  show one product card
  add <product-id>   add a product to the cart
  inc <product-id>   one more in the cart (one more pair for Buy 1 Get 1)
  dec <product-id>   one less in the cart
  rm <product-id>    remove the product's cart line
  cart               show the cart
  clear              empty the cart
  help               show this list
  quit               leave";

// =============================================================================
// Command Parsing
// =============================================================================

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List(Option<usize>),
    Search(String),
    Filter(String),
    Show(String),
    Add(String),
    Increment(String),
    Decrement(String),
    Remove(String),
    Cart,
    Clear,
    Help,
    Quit,
}

fn product_arg(verb: &str, arg: &str) -> Result<String, ApiError> {
    if arg.is_empty() {
        return Err(ApiError::validation(format!("Usage: {} <product-id>", verb)));
    }
    Ok(arg.to_string())
}

impl FromStr for Command {
    type Err = ApiError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb.to_lowercase().as_str() {
            "list" | "ls" => {
                if rest.is_empty() {
                    return Ok(Command::List(None));
                }
                rest.parse()
                    .map(|page| Command::List(Some(page)))
                    .map_err(|_| ApiError::validation(format!("'{}' is not a page number", rest)))
            }
            "search" => Ok(Command::Search(rest.to_string())),
            "filter" if rest.is_empty() => Err(ApiError::validation(
                "Usage: filter <all|flat|percentage|free|no-offers>",
            )),
            "filter" => Ok(Command::Filter(rest.to_string())),
            "show" => product_arg("show", rest).map(Command::Show),
            "add" => product_arg("add", rest).map(Command::Add),
            "inc" | "+" => product_arg("inc", rest).map(Command::Increment),
            "dec" | "-" => product_arg("dec", rest).map(Command::Decrement),
            "rm" | "remove" => product_arg("rm", rest).map(Command::Remove),
            "cart" => Ok(Command::Cart),
            "clear" => Ok(Command::Clear),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(ApiError::validation(format!(
                "Unknown command '{}'. Type 'help' for the list.",
                other
            ))),
        }
    }
}

// =============================================================================
// Session
// =============================================================================

/// What a command produced, ready to render.
#[derive(Debug)]
pub enum Outcome {
    Products(ProductPageResponse),
    Product(ProductCard),
    Cart(CartResponse),
    CartChanged(CartCommandResult),
    Help(StorefrontConfig),
    Quit,
}

/// The state one shell session owns.
#[derive(Debug)]
pub struct Session {
    config: ConfigState,
    catalog: CatalogState,
    cart: CartState,
}

impl Session {
    pub fn new(config: ConfigState, catalog: Catalog) -> Self {
        let catalog = CatalogState::new(catalog, config.page_size());
        Session {
            config,
            catalog,
            cart: CartState::new(),
        }
    }

    pub fn cart(&self) -> &CartState {
        &self.cart
    }

    /// Runs `change` on the product's line, or shows the cart unchanged
    /// when the product has no line.
    fn on_line<F>(&mut self, product_id: &str, change: F) -> Result<Outcome, ApiError>
    where
        F: FnOnce(&mut CartState, &LineItemId) -> Result<CartCommandResult, ApiError>,
    {
        match self.cart.line_for_product(product_id) {
            Some(id) => Ok(Outcome::CartChanged(change(&mut self.cart, &id)?)),
            None => {
                debug!(product_id = %product_id, "No cart line for product");
                Ok(Outcome::Cart(cart_cmd::get_cart(&self.cart)?))
            }
        }
    }

    /// Runs one command against the session state.
    pub fn execute(&mut self, command: Command) -> Result<Outcome, ApiError> {
        debug!(?command, "Executing shell command");

        let outcome = match command {
            Command::List(page) => Outcome::Products(product_cmd::list_products(&mut self.catalog, page)),
            Command::Search(term) => {
                Outcome::Products(product_cmd::search_products(&mut self.catalog, &term)?)
            }
            Command::Filter(kind) => {
                Outcome::Products(product_cmd::filter_products(&mut self.catalog, &kind)?)
            }
            Command::Show(product_id) => {
                Outcome::Product(product_cmd::get_product_by_id(&self.catalog, &product_id)?)
            }
            Command::Add(product_id) => Outcome::CartChanged(cart_cmd::add_to_cart(
                &self.catalog,
                &mut self.cart,
                &product_id,
            )?),
            Command::Increment(product_id) => self.on_line(&product_id, cart_cmd::increment_item)?,
            Command::Decrement(product_id) => self.on_line(&product_id, cart_cmd::decrement_item)?,
            Command::Remove(product_id) => self.on_line(&product_id, cart_cmd::remove_from_cart)?,
            Command::Cart => Outcome::Cart(cart_cmd::get_cart(&self.cart)?),
            Command::Clear => Outcome::CartChanged(cart_cmd::clear_cart(&mut self.cart)?),
            Command::Help => Outcome::Help(get_config(&self.config)),
            Command::Quit => Outcome::Quit,
        };

        Ok(outcome)
    }
}

// =============================================================================
// Rendering
// =============================================================================

fn render_products<W: Write>(out: &mut W, page: &ProductPageResponse) -> io::Result<()> {
    write!(out, "Products")?;
    if !page.search_term.is_empty() {
        write!(out, " matching \"{}\"", page.search_term)?;
    }
    writeln!(out, " [offer filter: {}]", page.offer_filter)?;

    if page.items.is_empty() {
        return writeln!(out, "  No products found.");
    }

    for card in &page.items {
        write!(
            out,
            "  {:<12} {:<28} {:>12}  ★{:.1}",
            card.id,
            card.name,
            card.price.to_string(),
            card.rating
        )?;
        match &card.offer_badge {
            Some(badge) => writeln!(out, "  [{}]", badge)?,
            None => writeln!(out)?,
        }
    }

    write!(out, "Page {} of {}", page.current_page, page.total_pages.max(1))?;
    write!(out, " ({} products)", page.total_items)?;
    if let Some(prev) = page.prev_page {
        write!(out, "  prev: list {}", prev)?;
    }
    if let Some(next) = page.next_page {
        write!(out, "  next: list {}", next)?;
    }
    writeln!(out)
}

fn render_product<W: Write>(out: &mut W, card: &ProductCard) -> io::Result<()> {
    writeln!(out, "{} ({})", card.name, card.id)?;
    writeln!(out, "  Price:  {}", card.price)?;
    writeln!(out, "  Rating: ★{:.1}", card.rating)?;
    writeln!(out, "  Offer:  {}", card.offer_badge.as_deref().unwrap_or("No Offer"))?;
    if !card.photo_url.is_empty() {
        writeln!(out, "  Photo:  {}", card.photo_url)?;
    }
    Ok(())
}

fn render_cart<W: Write>(out: &mut W, cart: &CartResponse) -> io::Result<()> {
    if cart.items.is_empty() {
        return writeln!(out, "Your cart is empty.");
    }

    writeln!(out, "Cart ({} items)", cart.totals.item_count)?;
    for item in &cart.items {
        let offer = item
            .offer()
            .map(ToString::to_string)
            .unwrap_or_else(|| "No Offer".to_string());
        writeln!(
            out,
            "  {:<12} {:<28} {:>12} x {:<3} {:<18} = {}",
            item.product().id,
            item.product().name,
            item.unit_price().to_string(),
            item.quantity(),
            offer,
            item.item_total()
        )?;
    }

    write!(out, "Total Amount: {}", cart.totals.total_amount)?;
    if cart.totals.total_savings.is_positive() {
        write!(out, " (you save {})", cart.totals.total_savings)?;
    }
    writeln!(out)
}

fn render_help<W: Write>(out: &mut W, config: &StorefrontConfig) -> io::Result<()> {
    writeln!(out, "{}", HELP)?;
    writeln!(
        out,
        "Catalog: {} / {}",
        config.products_path.display(),
        config.offers_path.display()
    )
}

fn render<W: Write>(out: &mut W, outcome: &Outcome) -> io::Result<()> {
    match outcome {
        Outcome::Products(page) => render_products(out, page),
        Outcome::Product(card) => render_product(out, card),
        Outcome::Cart(cart) => render_cart(out, cart),
        Outcome::CartChanged(result) => {
            if let Some(note) = &result.notification {
                let marker = match note.kind {
                    NotificationKind::Success => '+',
                    NotificationKind::Error => '-',
                };
                writeln!(out, "[{}] {}", marker, note.message)?;
            }
            render_cart(out, &result.cart)
        }
        Outcome::Help(config) => render_help(out, config),
        Outcome::Quit => writeln!(out, "Bye."),
    }
}

// =============================================================================
// Loop
// =============================================================================

/// Reads commands from `input` until `quit` or end of input.
pub fn run_shell<R, W>(session: &mut Session, input: R, mut out: W) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    writeln!(
        out,
        "Welcome to {}. Type 'help' for commands.",
        session.config.store_name()
    )?;
    render(&mut out, &Outcome::Products(product_cmd::list_products(&mut session.catalog, None)))?;

    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next().transpose()? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<Command>().and_then(|cmd| session.execute(cmd)) {
            Ok(Outcome::Quit) => {
                render(&mut out, &Outcome::Quit)?;
                break;
            }
            Ok(outcome) => render(&mut out, &outcome)?,
            Err(err) => writeln!(out, "error: {}", err)?,
        }
    }

    info!("Shell session ended");
    Ok(())
}
