use crate::app_config::{Config, CustomerPrompt};
use crate::error::{user_message, InputError};
use seatmap_core::{ChartStyle, Column, CustomerData, SeatInventory};
use std::io::{self, BufRead, Write};

const MENU: &str = "\n1. Check seat availability\n\
2. Book a seat\n\
3. Free a seat\n\
4. Show booking state\n\
5. List bookings\n\
6. Export snapshot (JSON)\n\
7. Exit program";

enum Flow {
    Continue,
    Exit,
}

/// Convert a 1-based row typed by the user into a row index.
pub fn parse_row(input: &str, rows: usize) -> Result<usize, InputError> {
    let input = input.trim();
    let row: usize = input
        .parse()
        .map_err(|_| InputError::NotANumber(input.to_string()))?;
    if row == 0 || row > rows {
        return Err(InputError::RowOutOfRange { rows });
    }
    Ok(row - 1)
}

/// Accepts A-F in either case. The aisle letter is rejected with its own message.
pub fn parse_column(input: &str) -> Result<Column, InputError> {
    let column: Column = input
        .parse()
        .map_err(|_| InputError::UnknownColumn(input.trim().to_string()))?;
    if !column.is_bookable() {
        return Err(InputError::AisleSelected);
    }
    Ok(column)
}

/// Text menu over any line-based input and output.
pub struct Menu<R, W> {
    input: R,
    output: W,
    chart_style: ChartStyle,
    customer_prompt: CustomerPrompt,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(input: R, output: W, config: &Config) -> Self {
        let chart_style = if config.display.show_references {
            ChartStyle::References
        } else {
            ChartStyle::Symbols
        };

        Self {
            input,
            output,
            chart_style,
            customer_prompt: config.booking.customer,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Run until the user exits or input ends.
    pub fn run(&mut self, inventory: &mut SeatInventory) -> anyhow::Result<()> {
        loop {
            writeln!(self.output, "{}", MENU)?;
            let Some(choice) = self.prompt("Choose an option: ")? else {
                tracing::debug!("Input closed, leaving menu");
                break;
            };

            let flow = match choice.as_str() {
                "1" => self.check_availability(inventory)?,
                "2" => self.book_seat(inventory)?,
                "3" => self.free_seat(inventory)?,
                "4" => self.show_state(inventory)?,
                "5" => self.list_bookings(inventory)?,
                "6" => self.export_snapshot(inventory)?,
                "7" => Flow::Exit,
                _ => {
                    writeln!(self.output, "Invalid option, please try again")?;
                    Flow::Continue
                }
            };

            publish_events(inventory)?;
            if let Flow::Exit = flow {
                break;
            }
        }
        Ok(())
    }

    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn read_seat(&mut self, rows: usize) -> anyhow::Result<Option<(usize, Column)>> {
        let Some(row) = self.prompt("Enter row number: ")? else {
            return Ok(None);
        };
        let Some(column) = self.prompt("Enter column letter (A-F): ")? else {
            return Ok(None);
        };

        match parse_row(&row, rows).and_then(|row| Ok((row, parse_column(&column)?))) {
            Ok(seat) => Ok(Some(seat)),
            Err(err) => {
                writeln!(self.output, "{}", err)?;
                Ok(None)
            }
        }
    }

    fn read_customer(&mut self) -> anyhow::Result<Option<CustomerData>> {
        let customer = match self.customer_prompt {
            CustomerPrompt::None => CustomerData::Anonymous,
            CustomerPrompt::Name => {
                let Some(name) = self.prompt("Enter customer name: ")? else {
                    return Ok(None);
                };
                CustomerData::named(name)
            }
            CustomerPrompt::Passenger => {
                let Some(passport) = self.prompt("Enter passport number: ")? else {
                    return Ok(None);
                };
                let Some(first_name) = self.prompt("Enter first name: ")? else {
                    return Ok(None);
                };
                let Some(last_name) = self.prompt("Enter last name: ")? else {
                    return Ok(None);
                };
                CustomerData::passenger(passport, first_name, last_name)
            }
        };
        Ok(Some(customer))
    }

    fn check_availability(&mut self, inventory: &SeatInventory) -> anyhow::Result<Flow> {
        let Some((row, column)) = self.read_seat(inventory.rows())? else {
            return Ok(Flow::Continue);
        };

        match inventory.check_availability(row, column) {
            Ok(true) => writeln!(self.output, "Seat is available")?,
            Ok(false) => writeln!(self.output, "Seat is already reserved or invalid")?,
            Err(err) => writeln!(self.output, "{}", user_message(&err))?,
        }
        Ok(Flow::Continue)
    }

    fn book_seat(&mut self, inventory: &mut SeatInventory) -> anyhow::Result<Flow> {
        let Some((row, column)) = self.read_seat(inventory.rows())? else {
            return Ok(Flow::Continue);
        };
        let Some(customer) = self.read_customer()? else {
            return Ok(Flow::Continue);
        };

        match inventory.book_seat(row, column, customer) {
            Ok(reference) => writeln!(
                self.output,
                "Seat successfully booked. Booking reference: {}",
                reference
            )?,
            Err(err) => writeln!(self.output, "{}", user_message(&err))?,
        }
        Ok(Flow::Continue)
    }

    fn free_seat(&mut self, inventory: &mut SeatInventory) -> anyhow::Result<Flow> {
        let Some((row, column)) = self.read_seat(inventory.rows())? else {
            return Ok(Flow::Continue);
        };

        match inventory.free_seat(row, column) {
            Ok(booking) => writeln!(
                self.output,
                "Seat successfully freed (booking {} released)",
                booking.reference
            )?,
            Err(err) => writeln!(self.output, "{}", user_message(&err))?,
        }
        Ok(Flow::Continue)
    }

    fn show_state(&mut self, inventory: &SeatInventory) -> anyhow::Result<Flow> {
        let snapshot = inventory.snapshot();
        write!(self.output, "{}", snapshot.render(self.chart_style))?;

        let occupancy = snapshot.occupancy;
        writeln!(
            self.output,
            "\nFree: {}  Reserved: {}  Utilization: {:.1}%",
            occupancy.free,
            occupancy.reserved,
            occupancy.utilization() * 100.0
        )?;
        Ok(Flow::Continue)
    }

    fn list_bookings(&mut self, inventory: &SeatInventory) -> anyhow::Result<Flow> {
        let snapshot = inventory.snapshot();
        if snapshot.bookings.is_empty() {
            writeln!(self.output, "No active bookings")?;
        } else {
            writeln!(self.output, "Current Bookings:")?;
            write!(self.output, "{}", snapshot.render_bookings())?;
        }
        Ok(Flow::Continue)
    }

    fn export_snapshot(&mut self, inventory: &SeatInventory) -> anyhow::Result<Flow> {
        writeln!(self.output, "{}", inventory.snapshot().to_json()?)?;
        Ok(Flow::Continue)
    }
}

fn publish_events(inventory: &mut SeatInventory) -> anyhow::Result<()> {
    for event in inventory.drain_events() {
        let payload = serde_json::to_string(&event)?;
        tracing::info!(
            seat = event.seat_number(),
            reference = event.booking_reference(),
            %payload,
            "Seat event"
        );
    }
    Ok(())
}
