//! Parameterized text templates for the external CAD formats.
//!
//! One template per logical element: schematic key+diode unit, schematic
//! sheet header/footer, board key+diode unit, stabilizer holes, mounting
//! hole, trace, via, board outline, net tables, project stub. Templates
//! contain no logic beyond value substitution; selection happens in the
//! assembly modules.

use crate::constants::{
    DIODE_CENTER_OFFSET_NM, SWITCH_PAD_COL_OFFSET_NM, SWITCH_PAD_DIODE_OFFSET_NM,
};
use crate::models::{fmt_mm, BoardPoint, NetId, NetTable, StabilizerVariant, TraceSegment};

/// Title-block and generation metadata shared by every rendered file.
#[derive(Debug, Clone)]
pub struct ProjectMeta {
    /// Project base name (drives output file names).
    pub name: String,
    /// Layout title for the schematic title block.
    pub title: String,
    /// Layout author for the schematic title block.
    pub author: String,
    /// Title-block date string; injected so output stays reproducible.
    pub date: String,
    /// Generated-by comment line.
    pub comment: String,
    /// Whether local traces and vias are emitted.
    pub routing: bool,
}

/// Context for the schematic key+diode unit template.
#[derive(Debug)]
pub struct SchematicKeyContext<'a> {
    /// Element sequence number.
    pub seq: usize,
    /// Switch position in mils, sheet-relative.
    pub x: i64,
    /// Switch position in mils, sheet-relative.
    pub y: i64,
    /// Assigned matrix row.
    pub row: u8,
    /// Assigned matrix column.
    pub col: u8,
    /// Footprint width label, e.g. `"1.00"`.
    pub width_label: &'a str,
    /// Full footprint identifier for the F2 field.
    pub footprint_id: &'a str,
}

/// Context for the board key+diode unit template.
#[derive(Debug)]
pub struct BoardKeyContext<'a> {
    /// Element sequence number.
    pub seq: usize,
    /// Key centre in board space.
    pub at: BoardPoint,
    /// Assigned matrix row.
    pub row: u8,
    /// Assigned matrix column.
    pub col: u8,
    /// Footprint width label.
    pub width_label: &'a str,
    /// Full footprint identifier.
    pub footprint_id: &'a str,
    /// Key legend, already escaped.
    pub legend: String,
    /// Column rail net.
    pub col_net: (usize, String),
    /// Row rail net.
    pub row_net: (usize, String),
    /// Per-key diode net.
    pub diode_net: (usize, String),
}

/// Escapes a legend for embedding in a quoted field.
#[must_use]
pub fn escape_text(raw: &str) -> String {
    raw.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', " ")
}

/// Quotes a net name when it contains characters the format treats as
/// delimiters; rail and supply nets stay bare.
#[must_use]
pub fn quote_net(name: &str) -> String {
    if !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '/')
    {
        name.to_string()
    } else {
        format!("\"{name}\"")
    }
}

/// Schematic sheet header with the title block.
#[must_use]
pub fn schematic_sheet_header(sheet: usize, sheet_count: usize, meta: &ProjectMeta) -> String {
    format!(
        "EESchema Schematic File Version 4\n\
         EELAYER 30 0\n\
         EELAYER END\n\
         $Descr A3 16535 11693\n\
         encoding utf-8\n\
         Sheet {sheet_num} {sheet_count}\n\
         Title \"{title}\"\n\
         Date \"{date}\"\n\
         Rev \"\"\n\
         Comp \"\"\n\
         Comment1 \"{comment}\"\n\
         Comment2 \"Author: {author}\"\n\
         Comment3 \"\"\n\
         Comment4 \"\"\n\
         $EndDescr\n",
        sheet_num = sheet + 1,
        title = escape_text(&meta.title),
        date = meta.date,
        comment = escape_text(&meta.comment),
        author = escape_text(&meta.author),
    )
}

/// Schematic sheet footer.
#[must_use]
pub fn schematic_sheet_footer() -> String {
    "$EndSCHEMATC\n".to_string()
}

/// One switch plus its matrix diode and rail labels on the schematic.
#[must_use]
pub fn schematic_key_unit(ctx: &SchematicKeyContext<'_>) -> String {
    let SchematicKeyContext {
        seq,
        x,
        y,
        row,
        col,
        width_label,
        footprint_id,
    } = ctx;
    let dx = x - 300;
    let dy = y + 300;
    format!(
        "$Comp\n\
         L Switch:SW_Push SW{seq}\n\
         U 1 1 {sw_stamp:08X}\n\
         P {x} {y}\n\
         F 0 \"SW{seq}\" H {x} {label_y} 50  0000 C CNN\n\
         F 1 \"SW_{width_label}u\" H {x} {value_y} 50  0001 C CNN\n\
         F 2 \"matrixpcb:{footprint_id}\" H {x} {y} 50  0001 C CNN\n\
         \t1    {x} {y}\n\
         \t1    0    0    -1\n\
         $EndComp\n\
         $Comp\n\
         L Device:D D{seq}\n\
         U 1 1 {d_stamp:08X}\n\
         P {dx} {dy}\n\
         F 0 \"D{seq}\" H {dx} {d_label_y} 50  0000 C CNN\n\
         F 1 \"1N4148\" H {dx} {d_value_y} 50  0001 C CNN\n\
         \t1    {dx} {dy}\n\
         \t1    0    0    -1\n\
         $EndComp\n\
         Wire Wire Line\n\
         \t{wire_x1} {y} {dx} {y}\n\
         Wire Wire Line\n\
         \t{dx} {y} {dx} {wire_y2}\n\
         Text GLabel {col_x} {y} 0    50   Input ~ 0\n\
         Col_{col}\n\
         Text GLabel {dx} {row_y} 3    50   Input ~ 0\n\
         Row_{row}\n",
        sw_stamp = 0x4B00_0000u32 + *seq as u32,
        d_stamp = 0x4400_0000u32 + *seq as u32,
        label_y = y - 200,
        value_y = y + 200,
        d_label_y = dy + 150,
        d_value_y = dy - 150,
        wire_x1 = x - 150,
        wire_y2 = dy - 150,
        col_x = x + 150,
        row_y = dy + 150,
    )
}

/// The board nets section: declarations plus the default net class.
#[must_use]
pub fn board_nets(nets: &NetTable) -> String {
    let mut declarations = String::from("  (net 0 \"\")\n");
    let mut additions = String::new();
    for (id, name) in nets.iter() {
        let quoted = quote_net(name);
        declarations.push_str(&format!("  (net {} {quoted})\n", id.number()));
        additions.push_str(&format!("    (add_net {quoted})\n"));
    }
    format!(
        "{declarations}\n\
         \x20 (net_class Default \"Generated switch matrix nets\"\n\
         \x20   (clearance 0.2)\n\
         \x20   (trace_width 0.25)\n\
         \x20   (via_dia 0.8)\n\
         \x20   (via_drill 0.4)\n\
         {additions}\x20 )\n"
    )
}

/// Board file header: format version, layer stack, net count.
#[must_use]
pub fn board_header(net_count: usize) -> String {
    format!(
        "(kicad_pcb (version 20171130) (host matrixpcb {version})\n\
         \n\
         \x20 (general\n\
         \x20   (nets {nets})\n\
         \x20 )\n\
         \n\
         \x20 (page A3)\n\
         \x20 (layers\n\
         \x20   (0 F.Cu signal)\n\
         \x20   (31 B.Cu signal)\n\
         \x20   (34 B.Paste paste)\n\
         \x20   (35 F.Paste paste)\n\
         \x20   (36 B.SilkS user)\n\
         \x20   (37 F.SilkS user)\n\
         \x20   (38 B.Mask mask)\n\
         \x20   (39 F.Mask mask)\n\
         \x20   (44 Edge.Cuts user)\n\
         \x20 )\n\n",
        version = env!("CARGO_PKG_VERSION"),
        nets = net_count + 1,
    )
}

/// Board file footer.
#[must_use]
pub fn board_footer() -> String {
    ")\n".to_string()
}

/// One switch footprint plus its diode footprint on the board.
#[must_use]
pub fn board_key_unit(ctx: &BoardKeyContext<'_>) -> String {
    let BoardKeyContext {
        seq,
        at,
        row,
        col,
        width_label,
        footprint_id,
        legend,
        col_net,
        row_net,
        diode_net,
    } = ctx;
    let diode_at = at.offset(DIODE_CENTER_OFFSET_NM.0, DIODE_CENTER_OFFSET_NM.1);
    format!(
        "  (module matrixpcb:{footprint_id} (layer F.Cu) (tedit 0) (tstamp {sw_stamp:08X})\n\
         \x20   (at {x} {y})\n\
         \x20   (descr \"Keyswitch {width_label}u at matrix {row},{col}\")\n\
         \x20   (fp_text reference SW{seq} (at 0 -7.9) (layer F.SilkS)\n\
         \x20     (effects (font (size 1 1) (thickness 0.15)))\n\
         \x20   )\n\
         \x20   (fp_text value \"{legend}\" (at 0 7.9) (layer F.Fab)\n\
         \x20     (effects (font (size 1 1) (thickness 0.15)))\n\
         \x20   )\n\
         \x20   (pad 1 thru_hole circle (at {p1x} {p1y}) (size 2.2 2.2) (drill 1.5) (layers *.Cu *.Mask)\n\
         \x20     (net {col_num} {col_name}))\n\
         \x20   (pad 2 thru_hole circle (at {p2x} {p2y}) (size 2.2 2.2) (drill 1.5) (layers *.Cu *.Mask)\n\
         \x20     (net {diode_num} {diode_name}))\n\
         \x20   (pad 3 np_thru_hole circle (at 0 0) (size 4 4) (drill 4) (layers *.Cu *.Mask))\n\
         \x20 )\n\
         \x20 (module Diode_THT:D_DO-35_SOD27_Horizontal (layer B.Cu) (tedit 0) (tstamp {d_stamp:08X})\n\
         \x20   (at {dx} {dy})\n\
         \x20   (fp_text reference D{seq} (at 0 -2.2) (layer B.SilkS)\n\
         \x20     (effects (font (size 1 1) (thickness 0.15)))\n\
         \x20   )\n\
         \x20   (fp_text value 1N4148 (at 0 2.2) (layer B.Fab)\n\
         \x20     (effects (font (size 1 1) (thickness 0.15)))\n\
         \x20   )\n\
         \x20   (pad 1 thru_hole rect (at 0 1.27) (size 1.6 1.6) (drill 0.8) (layers *.Cu *.Mask)\n\
         \x20     (net {row_num} {row_name}))\n\
         \x20   (pad 2 thru_hole circle (at 0 -1.27) (size 1.6 1.6) (drill 0.8) (layers *.Cu *.Mask)\n\
         \x20     (net {diode_num} {diode_name}))\n\
         \x20 )\n",
        sw_stamp = 0x4B00_0000u32 + *seq as u32,
        d_stamp = 0x4400_0000u32 + *seq as u32,
        x = at.x_mm(),
        y = at.y_mm(),
        p1x = fmt_mm(SWITCH_PAD_COL_OFFSET_NM.0),
        p1y = fmt_mm(SWITCH_PAD_COL_OFFSET_NM.1),
        p2x = fmt_mm(SWITCH_PAD_DIODE_OFFSET_NM.0),
        p2y = fmt_mm(SWITCH_PAD_DIODE_OFFSET_NM.1),
        col_num = col_net.0,
        col_name = quote_net(&col_net.1),
        row_num = row_net.0,
        row_name = quote_net(&row_net.1),
        diode_num = diode_net.0,
        diode_name = quote_net(&diode_net.1),
        dx = diode_at.x_mm(),
        dy = diode_at.y_mm(),
    )
}

/// Stabilizer mounting-hole pattern for a wide key.
#[must_use]
pub fn stabilizer_holes(seq: usize, at: BoardPoint, variant: StabilizerVariant) -> String {
    let half = fmt_mm(variant.stem_spacing_nm() / 2);
    format!(
        "  (module matrixpcb:Stabilizer_{label} (layer F.Cu) (tedit 0) (tstamp {stamp:08X})\n\
         \x20   (at {x} {y})\n\
         \x20   (fp_text reference ST{seq} (at 0 0) (layer F.Fab)\n\
         \x20     (effects (font (size 1 1) (thickness 0.15)))\n\
         \x20   )\n\
         \x20   (pad \"\" np_thru_hole circle (at -{half} -1.16) (size 3.05 3.05) (drill 3.05) (layers *.Cu *.Mask))\n\
         \x20   (pad \"\" np_thru_hole circle (at -{half} 4.46) (size 4 4) (drill 4) (layers *.Cu *.Mask))\n\
         \x20   (pad \"\" np_thru_hole circle (at {half} -1.16) (size 3.05 3.05) (drill 3.05) (layers *.Cu *.Mask))\n\
         \x20   (pad \"\" np_thru_hole circle (at {half} 4.46) (size 4 4) (drill 4) (layers *.Cu *.Mask))\n\
         \x20 )\n",
        label = variant.label(),
        stamp = 0x5300_0000u32 + seq as u32,
        x = at.x_mm(),
        y = at.y_mm(),
    )
}

/// One corner mounting hole.
#[must_use]
pub fn mounting_hole(index: usize, at: BoardPoint) -> String {
    format!(
        "  (module MountingHole:MountingHole_2.2mm_M2 (layer F.Cu) (tedit 0) (tstamp {stamp:08X})\n\
         \x20   (at {x} {y})\n\
         \x20   (fp_text reference H{index} (at 0 -3.2) (layer F.SilkS)\n\
         \x20     (effects (font (size 1 1) (thickness 0.15)))\n\
         \x20   )\n\
         \x20   (pad \"\" np_thru_hole circle (at 0 0) (size 2.2 2.2) (drill 2.2) (layers *.Cu *.Mask))\n\
         \x20 )\n",
        stamp = 0x4800_0000u32 + index as u32,
        x = at.x_mm(),
        y = at.y_mm(),
    )
}

/// One copper segment.
#[must_use]
pub fn board_trace(segment: &TraceSegment) -> String {
    format!(
        "  (segment (start {x1} {y1}) (end {x2} {y2}) (width 0.25) (layer {layer}) (net {net}))\n",
        x1 = segment.start.x_mm(),
        y1 = segment.start.y_mm(),
        x2 = segment.end.x_mm(),
        y2 = segment.end.y_mm(),
        layer = segment.layer.kicad_name(),
        net = segment.net.number(),
    )
}

/// One through via.
#[must_use]
pub fn board_via(at: BoardPoint, net: NetId) -> String {
    format!(
        "  (via (at {x} {y}) (size 0.8) (drill 0.4) (layers F.Cu B.Cu) (net {net}))\n",
        x = at.x_mm(),
        y = at.y_mm(),
        net = net.number(),
    )
}

/// Rectangular board outline on the edge-cuts layer.
#[must_use]
pub fn board_outline(min: BoardPoint, max: BoardPoint) -> String {
    let (x1, y1) = (min.x_mm(), min.y_mm());
    let (x2, y2) = (max.x_mm(), max.y_mm());
    format!(
        "  (gr_line (start {x1} {y1}) (end {x2} {y1}) (layer Edge.Cuts) (width 0.1))\n\
         \x20 (gr_line (start {x2} {y1}) (end {x2} {y2}) (layer Edge.Cuts) (width 0.1))\n\
         \x20 (gr_line (start {x2} {y2}) (end {x1} {y2}) (layer Edge.Cuts) (width 0.1))\n\
         \x20 (gr_line (start {x1} {y2}) (end {x1} {y1}) (layer Edge.Cuts) (width 0.1))\n"
    )
}

/// The project file stub tying the schematic and board together.
#[must_use]
pub fn project_stub(meta: &ProjectMeta) -> String {
    format!(
        "update=0\n\
         version=1\n\
         last_client=matrixpcb\n\
         [general]\n\
         version=1\n\
         RootSch={name}.sch\n\
         BoardNm={name}.kicad_pcb\n\
         [eeschema]\n\
         version=1\n\
         LibDir=\n\
         [pcbnew]\n\
         version=1\n\
         LastNetListRead=\n",
        name = meta.name,
    )
}
