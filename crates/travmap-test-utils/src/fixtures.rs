//! Sample sector files in every supported layout.
//!
//! The three world tables describe the same seven systems around Regina in
//! the Spinward Marches and are laid out exactly as the travmap writers
//! produce them, so parsing and re-serializing one must reproduce it.

/// Sector-grid location of the Spinward Marches.
pub const SPINWARD_MARCHES: (i32, i32) = (-4, -1);

/// Regina-area worlds in the column-delimited Second Survey layout.
pub const SECOND_SURVEY: &str = concat!(
    "Hex  Name                 UWP       Remarks              {Ix}   (Ex)    [Cx]   N     B  Z PBG W  A    Stellar     \n",
    "---- -------------------- --------- -------------------- ------ ------- ------ ----- -- - --- -- ---- ------------\n",
    "0101 Zeycude              C430698-9 De Na Ni Po          { 0 }  (C53-1) [6559] -     -  - 613 8  ZhCo K1 V        \n",
    "0102 Reno                 C4207B9-A De He Na Po          { 1 }  (D6A+1) [4B3A] -     -  - 102 10 ZhCo M2 V        \n",
    "1810 Efate                A646930-D Hi In                { 4 }  (E9D+3) [AD8E] BEF   NS - 704 9  ImDd M1 V M7 V   \n",
    "1910 Regina               A788899-C Ri Pa Ph An Cp       { 4 }  (D7E+5) [9C6D] BcCeF NS - 703 8  ImDd F7 V BD M3 V\n",
    "2007 Roup                 C7A5764-A Fl                   { 0 }  (A46+1) [5857] -     -  A 803 7  ImDd K0 V        \n",
    "1716 Ruie                 B5546A9-A Ag                   { 1 }  (B56+2) [6858] B     S  - 310 11 ImDd G5 V        \n",
    "2520                      X420000-0 Ba De Po             { -3 } (300-5) [0000] -     -  R 004 5  Na   M3 V        \n",
);

/// The same worlds in the tab-delimited layout.
pub const TAB_DELIMITED: &str = concat!(
    "Sector\tSS\tHex\tName\tUWP\tBases\tRemarks\tZone\tPBG\tAllegiance\tStars\t{Ix}\t(Ex)\t[Cx]\tNobility\tW\tRU\n",
    "Spin\tA\t0101\tZeycude\tC430698-9\t\tDe Na Ni Po\t\t613\tZhCo\tK1 V\t{ 0 }\t(C53-1)\t[6559]\t\t8\t-180\n",
    "Spin\tA\t0102\tReno\tC4207B9-A\t\tDe He Na Po\t\t102\tZhCo\tM2 V\t{ 1 }\t(D6A+1)\t[4B3A]\t\t10\t1430\n",
    "Spin\tC\t1810\tEfate\tA646930-D\tNS\tHi In\t\t704\tImDd\tM1 V M7 V\t{ 4 }\t(E9D+3)\t[AD8E]\tBEF\t9\t4862\n",
    "Spin\tC\t1910\tRegina\tA788899-C\tNS\tRi Pa Ph An Cp\t\t703\tImDd\tF7 V BD M3 V\t{ 4 }\t(D7E+5)\t[9C6D]\tBcCeF\t8\t4108\n",
    "Spin\tC\t2007\tRoup\tC7A5764-A\t\tFl\tA\t803\tImDd\tK0 V\t{ 0 }\t(A46+1)\t[5857]\t\t7\t240\n",
    "Spin\tG\t1716\tRuie\tB5546A9-A\tS\tAg\t\t310\tImDd\tG5 V\t{ 1 }\t(B56+2)\t[6858]\tB\t11\t660\n",
    "Spin\tH\t2520\t\tX420000-0\t\tBa De Po\tR\t004\tNa\tM3 V\t{ -3 }\t(300-5)\t[0000]\t\t5\t0\n",
);

/// The same worlds in the fixed-width legacy SEC layout, with column guide.
pub const LEGACY_SEC: &str = concat!(
    " 1-14: Name\n",
    "15-18: HexNbr\n",
    "20-28: UWP\n",
    "   31: Bases\n",
    "33-47: Codes & Comments\n",
    "   49: Zone\n",
    "52-54: PBG\n",
    "56-57: Allegiance\n",
    "59-74: Stellar Data\n",
    "\n",
    "....+....1....+....2....+....3....+....4....+....5....+....6....+....7....+....8\n",
    "\n",
    "Zeycude       0101 C430698-9    De Na Ni Po        613 Zh K1 V           \n",
    "Reno          0102 C4207B9-A    De He Na Po        102 Zh M2 V           \n",
    "Efate         1810 A646930-D  A Hi In              704 Im M1 V M7 V      \n",
    "Regina        1910 A788899-C  A Ri Pa Ph An Cp     703 Im F7 V BD M3 V   \n",
    "Roup          2007 C7A5764-A    Fl              A  803 Im K0 V           \n",
    "Ruie          1716 B5546A9-A  S Ag                 310 Im G5 V           \n",
    "              2520 X420000-0    Ba De Po        R  004 Na M3 V           \n",
);

/// Sector metadata in the MSEC layout, exercising every command.
pub const SPINWARD_MSEC: &str = concat!(
    "# Spinward Marches\n",
    "\n",
    "sector Spinward Marches\n",
    "domain Domain of Deneb\n",
    "alpha Cronor\n",
    "beta Jewell\n",
    "gamma Lanth\n",
    "delta Trin\n",
    "A Cronor\n",
    "C Regina\n",
    "ally Im Third Imperium\n",
    "ally Zh Zhodani Consulate\n",
    "base N S Imperial naval and scout base\n",
    "1910 Regina Highport\n",
    "border 1809 1909 2009 2010 1910 1810\n",
    "       1811 blue\n",
    "region 0101 0102 0201 purple\n",
    "route -1 0 3202 1910 yellow\n",
    "route 1910 1810\n",
    "label 1910,low,large Regina\n",
    "label 2007,+40,subsec,red Roup Station\n",
);

/// A small metadata file with CRLF endings, continuation lines, and edge-of-sector routes.
pub const EVIL_EXES_MSEC: &str = concat!(
    "\r\n",
    "# comment\r\n",
    "\r\n",
    "sector Sector Name\r\n",
    "domain Domain of Function\r\n",
    "alpha Q1\r\n",
    "beta Q2\r\n",
    "gamma Q3\r\n",
    "delta Q4\r\n",
    "\r\n",
    "ally X7 Seven Evil Exes\r\n",
    "border 0001 0002 0003 0004\r\n",
    "border 0000 0001 0002 0003\r\n",
    "       0004 0005 0006 blue\r\n",
    "route 0101 0202\r\n",
    "route -1 -1 3240 1 1 0101 red\r\n",
    "label 0123 Your text here",
);
