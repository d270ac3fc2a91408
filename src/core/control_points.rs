//! Kontrollpunkt-Modell einer Route: Hauptlinie, Abzweige und Fixpunkte.
//!
//! Alle Operationen sind synchron und alles-oder-nichts: eine abgelehnte
//! Operation gibt `false`/`None` zurück und lässt das Modell unverändert.

use super::{ConnectionRef, PointRef, SequenceId};
use crate::shared::geometry::{geo_distance, midpoint};
use glam::DVec2;
use indexmap::IndexSet;

/// Mindestanzahl Punkte der Hauptlinie während der Bearbeitung.
pub const MIN_MAIN_POINTS: usize = 2;

/// Sekundäre Linie, verankert an einem Punkt der Hauptlinie oder eines anderen Abzweigs.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    /// Anker des Abzweigs
    pub connection: ConnectionRef,
    /// Punktfolge (mindestens ein Punkt)
    pub points: Vec<DVec2>,
}

impl Branch {
    /// Erstellt einen neuen Abzweig.
    pub fn new(connection: ConnectionRef, points: Vec<DVec2>) -> Self {
        Self { connection, points }
    }
}

/// Positionen aller Punkte zu Beginn einer Geste.
///
/// Basis für alle Verschiebungs-Berechnungen einer Geste; wird nie auf
/// Zwischenstände umgestellt.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSnapshot {
    /// Hauptlinie
    pub main: Vec<DVec2>,
    /// Punktfolgen der Abzweige (gleiche Reihenfolge wie im Modell)
    pub branches: Vec<Vec<DVec2>>,
}

impl ModelSnapshot {
    /// Position eines Punkts im Snapshot.
    pub fn position(&self, point: PointRef) -> Option<DVec2> {
        match point {
            PointRef::Main(i) => self.main.get(i).copied(),
            PointRef::Branch(b, p) => self.branches.get(b)?.get(p).copied(),
        }
    }
}

/// Einfüge-Ziel für einen neuen Punkt: Punktfolge + Index des neuen Punkts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsertionSite {
    /// Punktfolge, in die eingefügt wird
    pub sequence: SequenceId,
    /// Index, den der neue Punkt erhält
    pub index: usize,
    /// Mittelpunkt des geteilten Segments
    pub midpoint: DVec2,
    /// Haversine-Distanz Klick → Mittelpunkt (Meter)
    pub distance_m: f64,
}

/// Editierbares Modell einer Route.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPointModel {
    main: Vec<DVec2>,
    branches: Vec<Branch>,
    fixed: IndexSet<PointRef>,
}

impl ControlPointModel {
    /// Erstellt ein Modell aus einer Hauptlinie ohne Abzweige.
    ///
    /// Gibt `None` zurück, wenn weniger als zwei Punkte übergeben werden.
    pub fn new(main: Vec<DVec2>) -> Option<Self> {
        if main.len() < MIN_MAIN_POINTS {
            return None;
        }
        Some(Self {
            main,
            branches: Vec::new(),
            fixed: IndexSet::new(),
        })
    }

    /// Erstellt ein Modell aus Hauptlinie und Abzweigen und prüft alle Anker.
    pub fn from_parts(main: Vec<DVec2>, branches: Vec<Branch>) -> anyhow::Result<Self> {
        if main.len() < MIN_MAIN_POINTS {
            anyhow::bail!(
                "Hauptlinie braucht mindestens {} Punkte, gefunden: {}",
                MIN_MAIN_POINTS,
                main.len()
            );
        }

        for (index, branch) in branches.iter().enumerate() {
            if branch.points.is_empty() {
                anyhow::bail!("Abzweig {} hat keine Punkte", index);
            }
            let resolvable = match branch.connection {
                ConnectionRef::ToMain(i) => i < main.len(),
                ConnectionRef::ToBranch(b, p) => {
                    b != index && branches.get(b).is_some_and(|other| p < other.points.len())
                }
            };
            if !resolvable {
                anyhow::bail!(
                    "Abzweig {}: Anker {:?} verweist auf keinen existierenden Punkt",
                    index,
                    branch.connection
                );
            }
        }

        Ok(Self {
            main,
            branches,
            fixed: IndexSet::new(),
        })
    }

    // ── Lesender Zugriff ─────────────────────────────────────────

    /// Punkte der Hauptlinie.
    pub fn main(&self) -> &[DVec2] {
        &self.main
    }

    /// Alle Abzweige.
    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    /// Ein Abzweig per Index.
    pub fn branch(&self, index: usize) -> Option<&Branch> {
        self.branches.get(index)
    }

    /// Menge der fixierten Punkte (Einfüge-Reihenfolge).
    pub fn fixed_points(&self) -> &IndexSet<PointRef> {
        &self.fixed
    }

    /// Ist der Punkt fixiert?
    pub fn is_fixed(&self, point: PointRef) -> bool {
        self.fixed.contains(&point)
    }

    /// Existiert der referenzierte Punkt?
    pub fn contains(&self, point: PointRef) -> bool {
        self.position(point).is_some()
    }

    /// Aktuelle Position eines Punkts.
    pub fn position(&self, point: PointRef) -> Option<DVec2> {
        match point {
            PointRef::Main(i) => self.main.get(i).copied(),
            PointRef::Branch(b, p) => self.branches.get(b)?.points.get(p).copied(),
        }
    }

    /// Punkte einer Punktfolge.
    pub fn sequence_points(&self, sequence: SequenceId) -> Option<&[DVec2]> {
        match sequence {
            SequenceId::Main => Some(&self.main),
            SequenceId::Branch(b) => self.branches.get(b).map(|br| br.points.as_slice()),
        }
    }

    /// Länge einer Punktfolge (0 wenn unbekannt).
    pub fn sequence_len(&self, sequence: SequenceId) -> usize {
        self.sequence_points(sequence).map_or(0, <[DVec2]>::len)
    }

    /// Endpunkt-Sperre: Index 0 und letzter Index der Hauptlinie,
    /// letzter Index eines Abzweigs.
    pub fn is_endpoint_locked(&self, point: PointRef) -> bool {
        match point {
            PointRef::Main(i) => i == 0 || i + 1 == self.main.len(),
            PointRef::Branch(b, p) => self
                .branches
                .get(b)
                .is_some_and(|br| p + 1 == br.points.len()),
        }
    }

    /// Position des Ankers eines Abzweigs.
    pub fn anchor_position(&self, branch: usize) -> Option<DVec2> {
        let connection = self.branches.get(branch)?.connection;
        self.position(connection.target())
    }

    /// Indizes aller Abzweige, deren Anker `point` ist.
    pub fn branches_anchored_at(&self, point: PointRef) -> Vec<usize> {
        self.branches
            .iter()
            .enumerate()
            .filter(|(_, br)| br.connection.target() == point)
            .map(|(i, _)| i)
            .collect()
    }

    /// Alle editierbaren Punkte (Hauptlinie zuerst, dann Abzweige).
    pub fn vertices(&self) -> impl Iterator<Item = (PointRef, DVec2)> + '_ {
        let main = self
            .main
            .iter()
            .enumerate()
            .map(|(i, p)| (PointRef::Main(i), *p));
        let branches = self.branches.iter().enumerate().flat_map(|(b, br)| {
            br.points
                .iter()
                .enumerate()
                .map(move |(p, pos)| (PointRef::Branch(b, p), *pos))
        });
        main.chain(branches)
    }

    /// Anzahl aller editierbaren Punkte.
    pub fn vertex_count(&self) -> usize {
        self.main.len() + self.branches.iter().map(|b| b.points.len()).sum::<usize>()
    }

    /// Snapshot aller Positionen für eine Geste.
    pub fn snapshot(&self) -> ModelSnapshot {
        ModelSnapshot {
            main: self.main.clone(),
            branches: self.branches.iter().map(|b| b.points.clone()).collect(),
        }
    }

    // ── Positionen ───────────────────────────────────────────────

    /// Setzt die Position eines existierenden Punkts.
    pub fn set_position(&mut self, point: PointRef, position: DVec2) -> bool {
        let slot = match point {
            PointRef::Main(i) => self.main.get_mut(i),
            PointRef::Branch(b, p) => self
                .branches
                .get_mut(b)
                .and_then(|br| br.points.get_mut(p)),
        };
        match slot {
            Some(slot) => {
                *slot = position;
                true
            }
            None => false,
        }
    }

    // ── Fixpunkte ────────────────────────────────────────────────

    /// Schaltet den Fix-Status eines Punkts um.
    ///
    /// Gibt den neuen Status zurück, `None` wenn der Punkt nicht existiert.
    pub fn toggle_fixed(&mut self, point: PointRef) -> Option<bool> {
        if !self.contains(point) {
            return None;
        }
        if self.fixed.shift_remove(&point) {
            Some(false)
        } else {
            self.fixed.insert(point);
            Some(true)
        }
    }

    fn remap_fixed(&mut self, remap: impl Fn(PointRef) -> Option<PointRef>) {
        self.fixed = self.fixed.iter().filter_map(|p| remap(*p)).collect();
    }

    // ── Hauptlinie ───────────────────────────────────────────────

    /// Fügt einen Punkt in die Hauptlinie ein; der neue Punkt erhält `index`.
    ///
    /// Fixpunkt- und Anker-Indizes ≥ `index` werden um eins erhöht.
    pub fn insert_main_point(&mut self, index: usize, point: DVec2) -> bool {
        if index > self.main.len() {
            return false;
        }
        self.main.insert(index, point);

        self.remap_fixed(|p| match p {
            PointRef::Main(j) if j >= index => Some(PointRef::Main(j + 1)),
            other => Some(other),
        });
        for branch in &mut self.branches {
            if let ConnectionRef::ToMain(j) = branch.connection {
                if j >= index {
                    branch.connection = ConnectionRef::ToMain(j + 1);
                }
            }
        }
        true
    }

    /// Entfernt einen Punkt der Hauptlinie.
    ///
    /// Abgelehnt, wenn die Hauptlinie unter zwei Punkte fallen würde.
    /// Abzweige mit Anker auf dem gelöschten Punkt werden (transitiv) entfernt.
    pub fn delete_main_point(&mut self, index: usize) -> bool {
        if index >= self.main.len() || self.main.len() <= MIN_MAIN_POINTS {
            return false;
        }
        self.main.remove(index);

        self.remap_fixed(|p| match p {
            PointRef::Main(j) if j == index => None,
            PointRef::Main(j) if j > index => Some(PointRef::Main(j - 1)),
            other => Some(other),
        });

        let mut orphaned = Vec::new();
        for (b, branch) in self.branches.iter_mut().enumerate() {
            if let ConnectionRef::ToMain(j) = branch.connection {
                if j == index {
                    orphaned.push(b);
                } else if j > index {
                    branch.connection = ConnectionRef::ToMain(j - 1);
                }
            }
        }
        self.remove_branches_cascading(orphaned);
        true
    }

    // ── Abzweige ─────────────────────────────────────────────────

    /// Fügt einen neuen Abzweig hinzu und gibt seinen Index zurück.
    ///
    /// Abgelehnt bei leerer Punktfolge oder nicht auflösbarem Anker.
    pub fn add_branch(&mut self, connection: ConnectionRef, points: Vec<DVec2>) -> Option<usize> {
        if points.is_empty() || !self.contains(connection.target()) {
            return None;
        }
        self.branches.push(Branch::new(connection, points));
        Some(self.branches.len() - 1)
    }

    /// Entfernt einen Abzweig samt aller Abzweige, die (transitiv) an ihm hängen.
    ///
    /// Gibt die Anzahl entfernter Abzweige zurück.
    pub fn remove_branch(&mut self, branch: usize) -> usize {
        if branch >= self.branches.len() {
            return 0;
        }
        self.remove_branches_cascading(vec![branch])
    }

    /// Fügt einen Punkt in einen Abzweig ein; der neue Punkt erhält `index`.
    pub fn insert_branch_point(&mut self, branch: usize, index: usize, point: DVec2) -> bool {
        let Some(target) = self.branches.get_mut(branch) else {
            return false;
        };
        if index > target.points.len() {
            return false;
        }
        target.points.insert(index, point);

        self.remap_fixed(|p| match p {
            PointRef::Branch(b, q) if b == branch && q >= index => {
                Some(PointRef::Branch(b, q + 1))
            }
            other => Some(other),
        });
        for other in &mut self.branches {
            if let ConnectionRef::ToBranch(b, q) = other.connection {
                if b == branch && q >= index {
                    other.connection = ConnectionRef::ToBranch(b, q + 1);
                }
            }
        }
        true
    }

    /// Entfernt einen Punkt eines Abzweigs.
    ///
    /// Der letzte verbleibende Punkt entfernt den ganzen Abzweig. Abzweige mit
    /// Anker auf dem gelöschten Punkt werden (transitiv) entfernt.
    pub fn delete_branch_point(&mut self, branch: usize, index: usize) -> bool {
        let Some(target) = self.branches.get_mut(branch) else {
            return false;
        };
        if index >= target.points.len() {
            return false;
        }
        if target.points.len() == 1 {
            self.remove_branches_cascading(vec![branch]);
            return true;
        }
        target.points.remove(index);

        self.remap_fixed(|p| match p {
            PointRef::Branch(b, q) if b == branch && q == index => None,
            PointRef::Branch(b, q) if b == branch && q > index => Some(PointRef::Branch(b, q - 1)),
            other => Some(other),
        });

        let mut orphaned = Vec::new();
        for (c, other) in self.branches.iter_mut().enumerate() {
            if let ConnectionRef::ToBranch(b, q) = other.connection {
                if b != branch {
                    continue;
                }
                if q == index {
                    orphaned.push(c);
                } else if q > index {
                    other.connection = ConnectionRef::ToBranch(b, q - 1);
                }
            }
        }
        self.remove_branches_cascading(orphaned);
        true
    }

    /// Entfernt die Start-Abzweige und alle, die transitiv an ihnen hängen.
    /// Verbleibende Abzweig-Indizes (Anker, Fixpunkte) werden neu nummeriert.
    fn remove_branches_cascading(&mut self, seeds: Vec<usize>) -> usize {
        let count = self.branches.len();
        let mut doomed = vec![false; count];
        let mut queue = seeds;

        while let Some(b) = queue.pop() {
            if b >= count || doomed[b] {
                continue;
            }
            doomed[b] = true;
            for (c, other) in self.branches.iter().enumerate() {
                if let ConnectionRef::ToBranch(target, _) = other.connection {
                    if target == b && !doomed[c] {
                        queue.push(c);
                    }
                }
            }
        }

        let removed = doomed.iter().filter(|d| **d).count();
        if removed == 0 {
            return 0;
        }

        let mut remap: Vec<Option<usize>> = Vec::with_capacity(count);
        let mut next = 0;
        for is_doomed in &doomed {
            if *is_doomed {
                remap.push(None);
            } else {
                remap.push(Some(next));
                next += 1;
            }
        }

        let old = std::mem::take(&mut self.branches);
        self.branches = old
            .into_iter()
            .zip(doomed)
            .filter(|(_, is_doomed)| !is_doomed)
            .map(|(branch, _)| branch)
            .collect();

        for branch in &mut self.branches {
            if let ConnectionRef::ToBranch(target, p) = branch.connection {
                // Überlebende Abzweige hängen nie an entfernten
                if let Some(new_target) = remap.get(target).copied().flatten() {
                    branch.connection = ConnectionRef::ToBranch(new_target, p);
                }
            }
        }

        self.remap_fixed(|p| match p {
            PointRef::Branch(b, q) => remap
                .get(b)
                .copied()
                .flatten()
                .map(|nb| PointRef::Branch(nb, q)),
            other => Some(other),
        });

        log::debug!("{} Abzweig(e) kaskadierend entfernt", removed);
        removed
    }

    // ── Generisch über PointRef ──────────────────────────────────

    /// Löscht einen beliebigen Punkt (Hauptlinie oder Abzweig).
    pub fn delete_point(&mut self, point: PointRef) -> bool {
        match point {
            PointRef::Main(i) => self.delete_main_point(i),
            PointRef::Branch(b, p) => self.delete_branch_point(b, p),
        }
    }

    /// Fügt einen Punkt an einer Einfüge-Stelle ein und gibt seine Referenz zurück.
    pub fn insert_at(&mut self, site: &InsertionSite, point: DVec2) -> Option<PointRef> {
        let inserted = match site.sequence {
            SequenceId::Main => self.insert_main_point(site.index, point),
            SequenceId::Branch(b) => self.insert_branch_point(b, site.index, point),
        };
        inserted.then(|| site.sequence.point(site.index))
    }

    // ── Einfüge-Heuristik ────────────────────────────────────────

    /// Alle sichtbaren Segmente als Einfüge-Kandidaten.
    ///
    /// Hauptlinie: aufeinanderfolgende Paare. Abzweige: Anker → erster Punkt,
    /// danach aufeinanderfolgende Paare.
    pub fn insertion_candidates(&self) -> Vec<(SequenceId, usize, DVec2, DVec2)> {
        let mut candidates = Vec::with_capacity(self.vertex_count());

        for (i, w) in self.main.windows(2).enumerate() {
            candidates.push((SequenceId::Main, i + 1, w[0], w[1]));
        }

        for (b, branch) in self.branches.iter().enumerate() {
            let sequence = SequenceId::Branch(b);
            if let (Some(anchor), Some(first)) = (self.anchor_position(b), branch.points.first()) {
                candidates.push((sequence, 0, anchor, *first));
            }
            for (j, w) in branch.points.windows(2).enumerate() {
                candidates.push((sequence, j + 1, w[0], w[1]));
            }
        }

        candidates
    }

    /// Segment, dessen Mittelpunkt dem Klick am nächsten liegt (Haversine).
    ///
    /// Bewusst grobe Heuristik über Segment-Mittelpunkte, keine Projektion
    /// auf das Segment. Bei Gleichstand gewinnt das zuerst gelistete Segment.
    pub fn nearest_insertion_segment(&self, click: DVec2) -> Option<InsertionSite> {
        let mut best: Option<InsertionSite> = None;

        for (sequence, index, a, b) in self.insertion_candidates() {
            let mid = midpoint(a, b);
            let distance_m = geo_distance(click, mid);
            if best.is_none_or(|current| distance_m < current.distance_m) {
                best = Some(InsertionSite {
                    sequence,
                    index,
                    midpoint: mid,
                    distance_m,
                });
            }
        }

        best
    }
}
