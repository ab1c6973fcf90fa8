//! Interactive text menu over any line-based input and output.
//!
//! The menu owns the tree for the lifetime of a session. Input ends either with
//! the exit choice or with end of input; both leave the menu without error.

use std::io::{BufRead, Write};

use tracing::{debug, info, instrument};

use crate::cli::error::CliResult;
use crate::config::DisplayStyle;
use crate::domain::{DomainError, HospitalTree, NodeKind, TreeNodeConvert};

pub const MENU_TEXT: &str = "
===== Hospital Management System =====
1. Add Department
2. Add Doctor to Department
3. Add Patient to Doctor
4. Delete Department
5. Delete Doctor
6. Delete Patient
7. Display Hospital Structure
8. Exit
";

pub const CHOICE_PROMPT: &str = "Enter your choice: ";

const DEPARTMENT_PROMPT: &str = "Enter department name: ";
const DOCTOR_PROMPT: &str = "Enter doctor's name: ";
const PATIENT_PROMPT: &str = "Enter patient's name: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddDepartment,
    AddDoctor,
    AddPatient,
    DeleteDepartment,
    DeleteDoctor,
    DeletePatient,
    Display,
    Exit,
}

impl MenuChoice {
    /// Parses a menu number; surrounding whitespace is ignored.
    pub fn parse(input: &str) -> Option<Self> {
        let choice = match input.trim().parse::<u32>().ok()? {
            1 => MenuChoice::AddDepartment,
            2 => MenuChoice::AddDoctor,
            3 => MenuChoice::AddPatient,
            4 => MenuChoice::DeleteDepartment,
            5 => MenuChoice::DeleteDoctor,
            6 => MenuChoice::DeletePatient,
            7 => MenuChoice::Display,
            8 => MenuChoice::Exit,
            _ => return None,
        };
        Some(choice)
    }
}

enum Flow {
    Continue,
    Quit,
}

pub struct Menu<R, W> {
    tree: HospitalTree,
    input: R,
    output: W,
    style: DisplayStyle,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(tree: HospitalTree, input: R, output: W) -> Self {
        Self {
            tree,
            input,
            output,
            style: DisplayStyle::default(),
        }
    }

    pub fn with_style(mut self, style: DisplayStyle) -> Self {
        self.style = style;
        self
    }

    pub fn tree(&self) -> &HospitalTree {
        &self.tree
    }

    pub fn into_tree(self) -> HospitalTree {
        self.tree
    }

    #[instrument(level = "debug", skip(self))]
    pub fn run(&mut self) -> CliResult<()> {
        loop {
            write!(self.output, "{}", MENU_TEXT)?;
            let Some(line) = self.prompt(CHOICE_PROMPT)? else {
                debug!("input closed, leaving menu");
                return Ok(());
            };
            let flow = match MenuChoice::parse(&line) {
                Some(choice) => {
                    debug!(?choice, "menu selection");
                    self.dispatch(choice)?
                }
                None => {
                    writeln!(self.output, "Invalid choice. Please try again.")?;
                    Flow::Continue
                }
            };
            if let Flow::Quit = flow {
                return Ok(());
            }
        }
    }

    fn dispatch(&mut self, choice: MenuChoice) -> CliResult<Flow> {
        match choice {
            MenuChoice::AddDepartment => self.add_department(),
            MenuChoice::AddDoctor => self.add_doctor(),
            MenuChoice::AddPatient => self.add_patient(),
            MenuChoice::DeleteDepartment => self.delete(NodeKind::Department, DEPARTMENT_PROMPT),
            MenuChoice::DeleteDoctor => self.delete(NodeKind::Doctor, DOCTOR_PROMPT),
            MenuChoice::DeletePatient => self.delete(NodeKind::Patient, PATIENT_PROMPT),
            MenuChoice::Display => {
                self.display()?;
                Ok(Flow::Continue)
            }
            MenuChoice::Exit => {
                writeln!(self.output, "Exiting the program.")?;
                Ok(Flow::Quit)
            }
        }
    }

    fn add_department(&mut self) -> CliResult<Flow> {
        let Some(name) = self.prompt(DEPARTMENT_PROMPT)? else {
            return Ok(Flow::Quit);
        };
        self.tree.add_department(&name);
        info!(department = %name, "department added");
        writeln!(self.output, "Department '{}' added successfully.", name)?;
        Ok(Flow::Continue)
    }

    fn add_doctor(&mut self) -> CliResult<Flow> {
        let Some(department_name) = self.prompt(DEPARTMENT_PROMPT)? else {
            return Ok(Flow::Quit);
        };
        let department = match self.tree.locate(NodeKind::Department, &department_name) {
            Ok(id) => id,
            Err(e) => return self.report(e),
        };
        let Some(doctor_name) = self.prompt(DOCTOR_PROMPT)? else {
            return Ok(Flow::Quit);
        };
        let Some(specialization) = self.prompt("Enter doctor's specialization: ")? else {
            return Ok(Flow::Quit);
        };

        self.tree
            .add_doctor(department, &doctor_name, &specialization)?;
        info!(doctor = %doctor_name, department = %department_name, "doctor added");
        writeln!(
            self.output,
            "Doctor '{}' added to department '{}' successfully.",
            doctor_name, department_name
        )?;
        Ok(Flow::Continue)
    }

    fn add_patient(&mut self) -> CliResult<Flow> {
        let Some(doctor_name) = self.prompt(DOCTOR_PROMPT)? else {
            return Ok(Flow::Quit);
        };
        let doctor = match self.tree.locate(NodeKind::Doctor, &doctor_name) {
            Ok(id) => id,
            Err(e) => return self.report(e),
        };
        let Some(patient_name) = self.prompt(PATIENT_PROMPT)? else {
            return Ok(Flow::Quit);
        };
        let Some(detail) =
            self.prompt("Enter patient details (e.g., diagnosis, age, treatment): ")?
        else {
            return Ok(Flow::Quit);
        };

        self.tree.add_patient(doctor, &patient_name, &detail)?;
        info!(patient = %patient_name, doctor = %doctor_name, "patient added");
        writeln!(
            self.output,
            "Patient '{}' added to Dr. '{}' successfully.",
            patient_name, doctor_name
        )?;
        Ok(Flow::Continue)
    }

    fn delete(&mut self, kind: NodeKind, prompt: &str) -> CliResult<Flow> {
        let Some(name) = self.prompt(prompt)? else {
            return Ok(Flow::Quit);
        };
        let root = self.tree.root();
        if !self.tree.delete_node(root, &name, kind) {
            return self.report(DomainError::NotFound { kind, name });
        }
        info!(%kind, %name, "deleted");
        writeln!(self.output, "{} '{}' deleted successfully.", kind.label(), name)?;
        Ok(Flow::Continue)
    }

    fn display(&mut self) -> CliResult<()> {
        match self.style {
            DisplayStyle::Indented => self.tree.write_display(&mut self.output)?,
            DisplayStyle::Tree => write!(self.output, "{}", self.tree.to_tree_string())?,
        }
        Ok(())
    }

    /// Not-found is printed and the session goes on; anything else is an error.
    fn report(&mut self, error: DomainError) -> CliResult<Flow> {
        match error {
            DomainError::NotFound { kind, name } => {
                debug!(%kind, %name, "lookup failed");
                writeln!(self.output, "{} not found.", kind.label())?;
                Ok(Flow::Continue)
            }
            other => Err(other.into()),
        }
    }

    /// Writes `text` and reads one line. `None` at end of input.
    fn prompt(&mut self, text: &str) -> CliResult<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        // Bytes that are not UTF-8 are replaced rather than ending the session
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&buf);
        Ok(Some(line.trim_end_matches(|c: char| c == '\n' || c == '\r').to_string()))
    }
}
