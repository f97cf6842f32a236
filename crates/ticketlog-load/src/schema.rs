//! DDL and insert statements for the four activity tables.
//!
//! Foreign keys are deferred to commit: `Tickets` and `Note`/`Task` reference
//! each other, and all rows of a load land in one transaction.

pub const TICKETS: &str = "Tickets";
pub const PERFORMER: &str = "Performer";
pub const NOTE: &str = "Note";
pub const TASK: &str = "Task";

pub const TABLES: [&str; 4] = [TICKETS, PERFORMER, NOTE, TASK];

pub const CREATE_TICKETS: &str = r#"
CREATE TABLE Tickets (
    ticket_id               integer NOT NULL PRIMARY KEY,
    time_ticket_created     text NOT NULL,
    performed_at            text NOT NULL,
    performer_id            integer NOT NULL,
    note_id                 integer,
    task_id                 integer,

    FOREIGN KEY(performer_id) REFERENCES Performer(performer_id) DEFERRABLE INITIALLY DEFERRED,
    FOREIGN KEY(note_id) REFERENCES Note(note_id) DEFERRABLE INITIALLY DEFERRED,
    FOREIGN KEY(task_id) REFERENCES Task(task_id) DEFERRABLE INITIALLY DEFERRED
)"#;

pub const CREATE_PERFORMER: &str = r#"
CREATE TABLE Performer (
    performer_id            integer NOT NULL PRIMARY KEY,
    performer_type          text NOT NULL
)"#;

pub const CREATE_NOTE: &str = r#"
CREATE TABLE Note (
    note_id                 integer NOT NULL PRIMARY KEY,
    note_type               integer NOT NULL,
    ticket_id               integer NOT NULL,

    FOREIGN KEY(ticket_id) REFERENCES Tickets(ticket_id) DEFERRABLE INITIALLY DEFERRED
)"#;

pub const CREATE_TASK: &str = r#"
CREATE TABLE Task (
    task_id                 integer NOT NULL PRIMARY KEY,
    shipping_address        text NOT NULL,
    category                text NOT NULL,
    contacted_customer      integer NOT NULL,
    issue_type              text NOT NULL,
    source                  integer NOT NULL,
    status                  text NOT NULL,
    priority                integer NOT NULL,
    task_group              text NOT NULL,
    agent_id                integer NOT NULL,
    requester               integer NOT NULL,
    product                 text NOT NULL,
    ticket_id               integer NOT NULL,

    FOREIGN KEY(ticket_id) REFERENCES Tickets(ticket_id) DEFERRABLE INITIALLY DEFERRED
)"#;

pub const CREATE_STATEMENTS: [&str; 4] = [CREATE_TICKETS, CREATE_PERFORMER, CREATE_NOTE, CREATE_TASK];

pub const INSERT_TICKET: &str = "INSERT INTO Tickets \
    (ticket_id, time_ticket_created, performed_at, performer_id, note_id, task_id) \
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

pub const INSERT_PERFORMER: &str =
    "INSERT OR IGNORE INTO Performer (performer_id, performer_type) VALUES (?1, ?2)";

pub const INSERT_NOTE: &str =
    "INSERT INTO Note (note_id, note_type, ticket_id) VALUES (?1, ?2, ?3)";

pub const INSERT_TASK: &str = "INSERT INTO Task \
    (task_id, shipping_address, category, contacted_customer, issue_type, source, status, \
     priority, task_group, agent_id, requester, product, ticket_id) \
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)";

pub const EXISTING_TABLES: &str = "SELECT name FROM sqlite_master \
    WHERE type = 'table' AND lower(name) IN ('tickets', 'performer', 'note', 'task') \
    ORDER BY name";
