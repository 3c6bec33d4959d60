//! Times common operations on the std collections with the stopwatch helper.
//!
//! `cargo run --example collections -- list-fill --count 100000`

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::fmt::Display;
use std::hint::black_box;

use anyhow::{Result, bail};
use clap::{Parser, ValueEnum};
use stopwatch_helper::{begin, finish, init_logging, measure};

/// Keys printed by the show-order scenarios.
const SHOWN_KEYS: usize = 20;

/// Keys hit on every iteration of the map get/remove loops.
const MAP_PROBES: [&str; 7] = ["1", "2", "3", "4", "5", "6", "7"];

/// Values hit on every iteration of the set remove loop.
const SET_PROBES: [usize; 3] = [1, 2, 3];

#[derive(Parser, Debug)]
#[command(name = "collections", about = "Time std collection operations")]
struct Cli {
    /// Operation to time
    #[arg(value_enum)]
    scenario: Scenario,

    /// Number of elements each collection is filled with, and the number of
    /// iterations of the map/set get and remove loops
    #[arg(short, long, default_value_t = 1_000_000)]
    count: usize,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Scenario {
    /// Push `count` elements into each list
    ListFill,
    /// Read and print the middle element of each list
    ListGet,
    /// Remove the middle element of each list
    ListRemoveMiddle,
    /// Remove the last element of each list
    ListRemoveEnd,
    /// Insert an element in the middle of each list
    ListAddMiddle,
    /// Insert `count` keys into each map
    MapFill,
    /// Print the first keys of each map in iteration order
    MapShowOrder,
    /// Look up six keys `count` times in each map
    MapGet,
    /// Remove seven keys `count` times from each map
    MapRemove,
    /// Insert `count` values into each set
    SetFill,
    /// Print the first values of each set in iteration order
    SetShowOrder,
    /// Remove three values `count` times from each set
    SetRemove,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    if cli.count == 0 {
        bail!("--count must be at least 1");
    }

    let count = cli.count;
    let middle = count / 2;

    match cli.scenario {
        Scenario::ListFill => {
            measure("Vec", || black_box(fill_vec(count)));
            measure("VecDeque", || black_box(fill_deque(count)));
            measure("LinkedList", || black_box(fill_linked(count)));
        }
        Scenario::ListGet => {
            let vec = fill_vec(count);
            let deque = fill_deque(count);
            let linked = fill_linked(count);
            measure("Vec", || print_element(vec.get(middle)));
            measure("VecDeque", || print_element(deque.get(middle)));
            measure("LinkedList", || print_element(linked.iter().nth(middle)));
        }
        Scenario::ListRemoveMiddle => {
            let mut vec = fill_vec(count);
            let mut deque = fill_deque(count);
            let mut linked = fill_linked(count);
            measure("Vec", || black_box(vec.remove(middle)));
            measure("VecDeque", || black_box(deque.remove(middle)));
            measure("LinkedList", || black_box(remove_linked(&mut linked, middle)));
        }
        Scenario::ListRemoveEnd => {
            let mut vec = fill_vec(count);
            let mut deque = fill_deque(count);
            let mut linked = fill_linked(count);
            measure("Vec", || black_box(vec.pop()));
            measure("VecDeque", || black_box(deque.pop_back()));
            measure("LinkedList", || black_box(linked.pop_back()));
        }
        Scenario::ListAddMiddle => {
            let mut vec = fill_vec(count);
            let mut deque = fill_deque(count);
            let mut linked = fill_linked(count);
            measure("Vec", || vec.insert(middle, 0));
            measure("VecDeque", || deque.insert(middle, 0));
            measure("LinkedList", || insert_linked(&mut linked, middle, 0));
        }
        Scenario::MapFill => {
            measure("HashMap", || black_box(fill_map::<HashMap<_, _>>(count)));
            measure("BTreeMap", || black_box(fill_map::<BTreeMap<_, _>>(count)));
        }
        Scenario::MapShowOrder => {
            let hash: HashMap<_, _> = fill_map(count);
            let tree: BTreeMap<_, _> = fill_map(count);
            show_order("HashMap", "key", hash.keys());
            show_order("BTreeMap", "key", tree.keys());
        }
        Scenario::MapGet => {
            let hash: HashMap<_, _> = fill_map(count);
            let tree: BTreeMap<_, _> = fill_map(count);
            measure("HashMap", || black_box(lookup_loop(&hash, count)));
            measure("BTreeMap", || black_box(lookup_loop(&tree, count)));
        }
        Scenario::MapRemove => {
            let mut hash: HashMap<_, _> = fill_map(count);
            let mut tree: BTreeMap<_, _> = fill_map(count);
            measure("HashMap", || {
                black_box(remove_loop(count, |key| hash.remove(key).is_some()))
            });
            measure("BTreeMap", || {
                black_box(remove_loop(count, |key| tree.remove(key).is_some()))
            });
        }
        Scenario::SetFill => {
            let start = begin("HashSet");
            let hash: HashSet<_> = (0..count).collect();
            finish(start);

            let start = begin("BTreeSet");
            let tree: BTreeSet<_> = (0..count).collect();
            finish(start);

            black_box((hash, tree));
        }
        Scenario::SetShowOrder => {
            let hash: HashSet<_> = (0..count).collect();
            let tree: BTreeSet<_> = (0..count).collect();
            show_order("HashSet", "value", hash.iter());
            show_order("BTreeSet", "value", tree.iter());
        }
        Scenario::SetRemove => {
            let mut hash: HashSet<_> = (0..count).collect();
            let mut tree: BTreeSet<_> = (0..count).collect();
            measure("HashSet", || black_box(set_remove_loop(count, |v| hash.remove(v))));
            measure("BTreeSet", || black_box(set_remove_loop(count, |v| tree.remove(v))));
        }
    }

    Ok(())
}

fn print_element(element: Option<&usize>) {
    match element {
        Some(value) => println!("Element: {value}"),
        None => println!("Element: <none>"),
    }
}

/// Prints a titled block of the first [`SHOWN_KEYS`] items, framed like a stopwatch pair.
fn show_order<I>(title: &str, label: &str, items: I)
where
    I: IntoIterator,
    I::Item: Display,
{
    println!("Start ({title}):");
    for line in order_lines(label, items) {
        println!("{line}");
    }
    println!("-------END-------\n");
}

fn order_lines<I>(label: &str, items: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: Display,
{
    items
        .into_iter()
        .take(SHOWN_KEYS)
        .map(|item| format!("{label}: {item}"))
        .collect()
}

fn fill_vec(count: usize) -> Vec<usize> {
    let mut vec = Vec::new();
    for i in 0..count {
        vec.push(i);
    }
    vec
}

fn fill_deque(count: usize) -> VecDeque<usize> {
    let mut deque = VecDeque::new();
    for i in 0..count {
        deque.push_back(i);
    }
    deque
}

fn fill_linked(count: usize) -> LinkedList<usize> {
    let mut linked = LinkedList::new();
    for i in 0..count {
        linked.push_back(i);
    }
    linked
}

fn remove_linked(list: &mut LinkedList<usize>, index: usize) -> Option<usize> {
    if index >= list.len() {
        return None;
    }
    let mut tail = list.split_off(index);
    let removed = tail.pop_front();
    list.append(&mut tail);
    removed
}

fn insert_linked(list: &mut LinkedList<usize>, index: usize, value: usize) {
    let mut tail = list.split_off(index.min(list.len()));
    list.push_back(value);
    list.append(&mut tail);
}

/// Keys are the decimal indices `1..=count`, so hash and sorted string order differ visibly.
fn fill_map<M>(count: usize) -> M
where
    M: FromIterator<(String, usize)>,
{
    (1..=count).map(|i| (i.to_string(), i)).collect()
}

trait Lookup {
    fn contains(&self, key: &str) -> bool;
}

impl Lookup for HashMap<String, usize> {
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

impl Lookup for BTreeMap<String, usize> {
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// Looks up the first six probe keys `iterations` times; returns the number of hits.
fn lookup_loop<M: Lookup>(map: &M, iterations: usize) -> usize {
    let mut hits = 0;
    for _ in 0..iterations {
        for key in &MAP_PROBES[..6] {
            if map.contains(black_box(key)) {
                hits += 1;
            }
        }
    }
    hits
}

/// Removes every probe key `iterations` times; returns how many removals found a key.
fn remove_loop<F>(iterations: usize, mut remove: F) -> usize
where
    F: FnMut(&str) -> bool,
{
    let mut removed = 0;
    for _ in 0..iterations {
        for key in MAP_PROBES {
            if remove(black_box(key)) {
                removed += 1;
            }
        }
    }
    removed
}

fn set_remove_loop<F>(iterations: usize, mut remove: F) -> usize
where
    F: FnMut(&usize) -> bool,
{
    let mut removed = 0;
    for _ in 0..iterations {
        for value in &SET_PROBES {
            if remove(black_box(value)) {
                removed += 1;
            }
        }
    }
    removed
}
